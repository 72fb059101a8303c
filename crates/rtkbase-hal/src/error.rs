use thiserror::Error;

pub type HalResult<T> = std::result::Result<T, HalError>;

#[derive(Error, Debug)]
pub enum HalError {
    #[error("Permission denied")]
    PermissionDenied,

    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Command failed: {program} (exit={code:?}): {stderr}")]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Command timed out: {program} after {timeout_secs}s")]
    CommandTimeout { program: String, timeout_secs: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(unix)]
    #[error("nix errno: {0}")]
    Nix(#[from] nix::errno::Errno),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No volume information for {0}")]
    NoVolume(String),

    #[error("{0}")]
    Other(String),
}
