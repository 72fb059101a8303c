//! Fake HAL implementation for testing.
//!
//! Drives and files live in memory and every query is recorded, allowing
//! CI-safe testing of the media scan without real card readers.

use super::{DriveId, ErrorMode, ErrorModeOps, VolumeInfo, VolumeOps};
use crate::{HalError, HalResult};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Operation records for testing and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListDrives,
    QueryRemovable { drive: DriveId },
    QueryVolume { drive: DriveId },
    FileExists { path: PathBuf },
    SuppressCriticalErrors,
    RestoreErrorMode { mode: ErrorMode },
}

/// One simulated drive.
#[derive(Debug, Clone)]
pub struct FakeDrive {
    pub removable: bool,
    /// `None` makes the volume query fail, like an empty card reader.
    pub volume: Option<VolumeInfo>,
}

impl FakeDrive {
    pub fn removable(volume: VolumeInfo) -> Self {
        Self {
            removable: true,
            volume: Some(volume),
        }
    }

    pub fn fixed(volume: VolumeInfo) -> Self {
        Self {
            removable: false,
            volume: Some(volume),
        }
    }

    /// A removable slot whose volume cannot be queried.
    pub fn empty_slot() -> Self {
        Self {
            removable: true,
            volume: None,
        }
    }
}

/// Shared state for FakeHal operations.
#[derive(Debug, Clone, Default)]
struct FakeHalState {
    /// All operations that were recorded
    operations: Vec<Operation>,
    /// Drives in the order the host would report them
    drives: Vec<(DriveId, FakeDrive)>,
    /// Paths that exist as regular files
    files: HashSet<PathBuf>,
    error_mode: ErrorMode,
    fail_listing: bool,
}

/// Fake HAL implementation that answers from memory and records every query.
#[derive(Debug, Clone, Default)]
pub struct FakeHal {
    state: Arc<Mutex<FakeHalState>>,
}

impl FakeHal {
    /// Mode reported while critical errors are suppressed.
    pub const SUPPRESSED_MODE: ErrorMode = ErrorMode(0x0001);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drive(self, id: impl Into<String>, drive: FakeDrive) -> Self {
        self.lock().drives.push((DriveId::new(id), drive));
        self
    }

    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        self.lock().files.insert(path.into());
        self
    }

    pub fn with_error_mode(self, mode: ErrorMode) -> Self {
        self.lock().error_mode = mode;
        self
    }

    /// Make drive enumeration itself fail.
    pub fn with_failing_listing(self) -> Self {
        self.lock().fail_listing = true;
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.lock().operations.clone()
    }

    /// Check if a specific operation was recorded.
    pub fn has_operation(&self, check: impl Fn(&Operation) -> bool) -> bool {
        self.lock().operations.iter().any(check)
    }

    /// Current simulated critical-error mode.
    pub fn error_mode(&self) -> ErrorMode {
        self.lock().error_mode
    }

    /// Clear all recorded operations.
    pub fn clear(&self) {
        self.lock().operations.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeHalState> {
        match self.state.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn record_operation(&self, op: Operation) {
        self.lock().operations.push(op);
    }

    fn drive(&self, drive: &DriveId) -> HalResult<FakeDrive> {
        self.lock()
            .drives
            .iter()
            .find(|(id, _)| id == drive)
            .map(|(_, d)| d.clone())
            .ok_or_else(|| HalError::Other(format!("no such drive: {}", drive)))
    }
}

impl VolumeOps for FakeHal {
    fn logical_drives(&self) -> HalResult<Vec<DriveId>> {
        self.record_operation(Operation::ListDrives);
        let state = self.lock();
        if state.fail_listing {
            return Err(HalError::PermissionDenied);
        }
        Ok(state.drives.iter().map(|(id, _)| id.clone()).collect())
    }

    fn is_removable(&self, drive: &DriveId) -> HalResult<bool> {
        self.record_operation(Operation::QueryRemovable {
            drive: drive.clone(),
        });
        Ok(self.drive(drive)?.removable)
    }

    fn volume_info(&self, drive: &DriveId) -> HalResult<VolumeInfo> {
        self.record_operation(Operation::QueryVolume {
            drive: drive.clone(),
        });
        self.drive(drive)?
            .volume
            .ok_or_else(|| HalError::NoVolume(drive.to_string()))
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.record_operation(Operation::FileExists {
            path: path.to_path_buf(),
        });
        self.lock().files.contains(path)
    }
}

impl ErrorModeOps for FakeHal {
    fn suppress_critical_errors(&self) -> ErrorMode {
        self.record_operation(Operation::SuppressCriticalErrors);
        let mut state = self.lock();
        std::mem::replace(&mut state.error_mode, Self::SUPPRESSED_MODE)
    }

    fn restore_error_mode(&self, previous: ErrorMode) {
        self.record_operation(Operation::RestoreErrorMode { mode: previous });
        self.lock().error_mode = previous;
    }
}
