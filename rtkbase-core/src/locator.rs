//! Finds the Raspberry Pi boot partition among the host's removable volumes.

use rtkbase_hal::{CriticalErrorGuard, DriveId, MediaHal, VolumeOps};
use std::path::{Path, PathBuf};

/// What identifies the boot partition of a Raspberry Pi OS card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootSignature {
    pub filesystem: &'static str,
    pub label: &'static str,
    /// Firmware config, kernel command line and bootloader, in probe order.
    pub markers: [&'static str; 3],
}

pub const RASPBERRY_PI_BOOTFS: BootSignature = BootSignature {
    filesystem: "FAT32",
    label: "bootfs",
    markers: ["config.txt", "cmdline.txt", "BOOTCODE.BIN"],
};

/// One host volume as seen during a single scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageDevice {
    pub drive: DriveId,
    pub removable: bool,
    pub filesystem: String,
    pub label: String,
    pub read_only: bool,
    pub root: Option<PathBuf>,
}

/// The located boot partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootVolume {
    pub drive: DriveId,
    pub root: PathBuf,
}

impl BootSignature {
    /// Why `device` fails the volume checks, or `None` if it passes them.
    pub fn volume_mismatch(&self, device: &StorageDevice) -> Option<String> {
        if !device.removable {
            return Some("not removable".to_string());
        }
        if device.read_only {
            return Some("read-only".to_string());
        }
        if device.filesystem != self.filesystem {
            return Some(format!("filesystem '{}'", device.filesystem));
        }
        if device.label != self.label {
            return Some(format!("label '{}'", device.label));
        }
        None
    }

    /// All marker files exist under `root`. Stops at the first missing one.
    pub fn markers_present<H: VolumeOps + ?Sized>(&self, hal: &H, root: &Path) -> bool {
        self.markers
            .iter()
            .all(|marker| hal.file_exists(&root.join(marker)))
    }
}

/// Returns the drive holding the boot partition, if one is attached.
pub fn locate<H: MediaHal + ?Sized>(hal: &H) -> Option<DriveId> {
    locate_volume(hal).map(|v| v.drive)
}

/// Like [`locate`], also returning where the volume root is reachable.
pub fn locate_volume<H: MediaHal + ?Sized>(hal: &H) -> Option<BootVolume> {
    locate_with(hal, &RASPBERRY_PI_BOOTFS)
}

/// Scans drives in ascending order and returns the first matching `signature`.
///
/// Nothing here fails: a drive whose queries error out is skipped, and an
/// enumeration failure reads as "not found".
pub fn locate_with<H: MediaHal + ?Sized>(hal: &H, signature: &BootSignature) -> Option<BootVolume> {
    let _guard = CriticalErrorGuard::acquire(hal);

    let mut drives = match hal.logical_drives() {
        Ok(drives) => drives,
        Err(err) => {
            log::warn!("Could not list drives: {}", err);
            return None;
        }
    };
    drives.sort();

    for drive in drives {
        if let Some(volume) = probe(hal, signature, drive) {
            log::info!(
                "💾 Found boot partition on {} ({})",
                volume.drive,
                volume.root.display()
            );
            return Some(volume);
        }
    }

    log::info!(
        "No removable {} volume labelled '{}' found",
        signature.filesystem,
        signature.label
    );
    None
}

fn probe<H: MediaHal + ?Sized>(
    hal: &H,
    signature: &BootSignature,
    drive: DriveId,
) -> Option<BootVolume> {
    // Fixed disks are dropped before any filesystem query.
    match hal.is_removable(&drive) {
        Ok(true) => {}
        Ok(false) => {
            log::debug!("{}: skipped, not removable", drive);
            return None;
        }
        Err(err) => {
            log::debug!("{}: skipped, removability unknown: {}", drive, err);
            return None;
        }
    }

    let info = match hal.volume_info(&drive) {
        Ok(info) => info,
        Err(err) => {
            log::debug!("{}: skipped, no volume information: {}", drive, err);
            return None;
        }
    };

    let device = StorageDevice {
        drive,
        removable: true,
        filesystem: info.filesystem,
        label: info.label,
        read_only: info.read_only,
        root: info.root,
    };

    if let Some(reason) = signature.volume_mismatch(&device) {
        log::debug!("{}: skipped, {}", device.drive, reason);
        return None;
    }

    let Some(root) = device.root else {
        log::debug!("{}: skipped, not mounted", device.drive);
        return None;
    };

    if !signature.markers_present(hal, &root) {
        log::debug!("{}: skipped, boot files missing", device.drive);
        return None;
    }

    Some(BootVolume {
        drive: device.drive,
        root,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(filesystem: &str, label: &str, read_only: bool) -> StorageDevice {
        StorageDevice {
            drive: DriveId::new("E:"),
            removable: true,
            filesystem: filesystem.to_string(),
            label: label.to_string(),
            read_only,
            root: Some(PathBuf::from("E:\\")),
        }
    }

    #[test]
    fn matching_volume_has_no_mismatch() {
        assert_eq!(
            RASPBERRY_PI_BOOTFS.volume_mismatch(&device("FAT32", "bootfs", false)),
            None
        );
    }

    #[test]
    fn comparisons_are_exact_and_case_sensitive() {
        let sig = RASPBERRY_PI_BOOTFS;
        assert!(sig.volume_mismatch(&device("fat32", "bootfs", false)).is_some());
        assert!(sig.volume_mismatch(&device("FAT16", "bootfs", false)).is_some());
        assert!(sig.volume_mismatch(&device("FAT32", "BOOTFS", false)).is_some());
        assert!(sig.volume_mismatch(&device("FAT32", "boot", false)).is_some());
        assert!(sig.volume_mismatch(&device("FAT32", "bootfs ", false)).is_some());
    }

    #[test]
    fn read_only_volume_is_rejected() {
        assert_eq!(
            RASPBERRY_PI_BOOTFS.volume_mismatch(&device("FAT32", "bootfs", true)),
            Some("read-only".to_string())
        );
    }

    #[test]
    fn fixed_volume_is_rejected() {
        let mut d = device("FAT32", "bootfs", false);
        d.removable = false;
        assert!(RASPBERRY_PI_BOOTFS.volume_mismatch(&d).is_some());
    }
}
