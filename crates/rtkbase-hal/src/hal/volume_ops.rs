//! Storage volume queries.

use crate::HalResult;
use std::fmt;
use std::path::{Path, PathBuf};

/// Host handle for one logical volume.
///
/// On Windows this is the drive letter with its colon (`E:`); on Linux the
/// kernel block device name (`sdb1`, `mmcblk0p1`). Ordering is plain string
/// ordering, which is also drive-letter order on Windows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriveId(String);

impl DriveId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DriveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Answer of the single combined volume-information query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VolumeInfo {
    /// Filesystem name as the host reports it (`FAT32`, `NTFS`, `EXT4`).
    pub filesystem: String,
    pub label: String,
    pub read_only: bool,
    /// Where the volume root is reachable, `None` while it is not mounted.
    pub root: Option<PathBuf>,
}

/// Volume probing operations trait.
pub trait VolumeOps {
    /// Return every logical volume currently present on the host.
    fn logical_drives(&self) -> HalResult<Vec<DriveId>>;

    /// Whether the medium behind `drive` is removable.
    fn is_removable(&self, drive: &DriveId) -> HalResult<bool>;

    /// Filesystem type, label, read-only flag and root of `drive` in one query.
    fn volume_info(&self, drive: &DriveId) -> HalResult<VolumeInfo>;

    /// Whether a regular file exists at `path`. Failures count as absent.
    fn file_exists(&self, path: &Path) -> bool;
}
