use clap::Parser;
use rtkbase_core::locator::locate_volume;
use rtkbase_core::provision::{save, save_to_dir, SaveReport};
use rtkbase_core::serializer::render_to_string;
use rtkbase_core::validation::{is_valid_login, validate};
use rtkbase_core::{ProvisionError, ValidationError};
use rtkbase_hal::HostHal;

mod cli;
mod form;

fn main() {
    let cli = cli::Cli::parse();
    rtkbase_core::logging::init_with(cli.log_file.clone(), cli.verbose);

    if let Err(err) = run(&cli) {
        // Provision errors already carry their cause in the message.
        let code = match err.downcast_ref::<ProvisionError>() {
            Some(provision) => {
                eprintln!("❌ {}", provision);
                provision.exit_code()
            }
            None => {
                eprintln!("❌ {:#}", err);
                1
            }
        };
        std::process::exit(code);
    }
}

fn run(cli: &cli::Cli) -> anyhow::Result<()> {
    match &cli.command {
        cli::Command::Locate => {
            let hal = HostHal::default();
            let volume = locate_volume(&hal).ok_or(ProvisionError::MediaNotFound)?;
            println!("{}\t{}", volume.drive, volume.root.display());
        }
        cli::Command::Render(args) => {
            let record = form::load_record(args)?;
            validate(&record).map_err(ProvisionError::from)?;
            print!("{}", render_to_string(&record));
        }
        cli::Command::Write {
            record,
            target,
            dry_run,
        } => {
            let record = form::load_record(record)?;
            let report = match target {
                Some(dir) => save_to_dir(record, dir, *dry_run)?,
                None => save(&HostHal::default(), record, *dry_run)?,
            };
            print_report(&report);
        }
        cli::Command::CheckLogin { login } => {
            if !is_valid_login(login) {
                let invalid = ValidationError::InvalidLogin(login.clone());
                return Err(ProvisionError::from(invalid).into());
            }
            println!("✅ '{}' is a valid login", login);
        }
    }
    Ok(())
}

fn print_report(report: &SaveReport) {
    if !report.written {
        println!("DRY RUN: {} would contain:", report.path.display());
        for line in &report.lines {
            println!("  {}", line);
        }
        return;
    }

    match &report.drive {
        Some(drive) => println!(
            "✅ RtkBase config saved to {} ({})",
            report.path.display(),
            drive
        ),
        None => println!("✅ RtkBase config saved to {}", report.path.display()),
    }
}
