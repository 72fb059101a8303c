//! The save action: validate, find the card, write `system.txt`.

use crate::errors::ProvisionError;
use crate::locator::locate_volume;
use crate::serializer::{config_path, render, serialize};
use crate::settings::SettingsRecord;
use crate::validation::validate;
use rtkbase_hal::{DriveId, MediaHal};
use std::path::{Path, PathBuf};

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// Drive the file went to; `None` when an explicit directory was given.
    pub drive: Option<DriveId>,
    pub path: PathBuf,
    pub lines: Vec<String>,
    /// `false` for a dry run.
    pub written: bool,
}

/// Validates `record`, locates the boot partition and writes the file there.
pub fn save<H: MediaHal + ?Sized>(
    hal: &H,
    record: SettingsRecord,
    dry_run: bool,
) -> Result<SaveReport, ProvisionError> {
    validate(&record)?;

    let volume = locate_volume(hal).ok_or(ProvisionError::MediaNotFound)?;
    let mut report = write(record, &volume.root, dry_run)?;
    report.drive = Some(volume.drive);
    Ok(report)
}

/// Validates `record` and writes the file into `dir` without searching for a card.
pub fn save_to_dir(
    record: SettingsRecord,
    dir: &Path,
    dry_run: bool,
) -> Result<SaveReport, ProvisionError> {
    validate(&record)?;
    write(record, dir, dry_run)
}

fn write(record: SettingsRecord, root: &Path, dry_run: bool) -> Result<SaveReport, ProvisionError> {
    let path = config_path(root);
    let lines = render(&record);

    if dry_run {
        log::info!("DRY RUN: would write {} lines to {}", lines.len(), path.display());
    } else {
        serialize(record, &path)?;
    }

    Ok(SaveReport {
        drive: None,
        path,
        lines,
        written: !dry_run,
    })
}
