use std::fs;
use std::path::PathBuf;

/// Initialise `env_logger`.
///
/// `RUST_LOG` wins over the default level. When `log_file` cannot be opened
/// the logs go to stderr instead.
pub fn init_with(log_file: Option<PathBuf>, verbose: bool) {
    use env_logger::Target;

    let target = log_file
        .and_then(|path| {
            fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        })
        .map(|file| Target::Pipe(Box::new(file)))
        .unwrap_or(Target::Stderr);

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(target)
        .try_init();
}
