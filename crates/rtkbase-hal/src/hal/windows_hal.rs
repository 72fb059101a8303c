//! Windows HAL implementation using the Win32 volume APIs.

use super::{DriveId, ErrorMode, ErrorModeOps, VolumeInfo, VolumeOps};
use crate::{HalError, HalResult};
use std::path::{Path, PathBuf};

use windows::core::PCWSTR;
use windows::Win32::Storage::FileSystem::{
    GetDriveTypeW, GetLogicalDrives, GetVolumeInformationW,
};
use windows::Win32::System::Diagnostics::Debug::{
    SetErrorMode, SEM_FAILCRITICALERRORS, THREAD_ERROR_MODE,
};

const DRIVE_REMOVABLE: u32 = 2;
const FILE_READ_ONLY_VOLUME: u32 = 0x0008_0000;

/// Real HAL implementation for Windows hosts.
#[derive(Debug, Clone, Default)]
pub struct WindowsHal;

impl WindowsHal {
    pub fn new() -> Self {
        Self
    }
}

fn wide(s: &str) -> Vec<u16> {
    use std::os::windows::prelude::*;
    std::ffi::OsStr::new(s)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

fn root_of(drive: &DriveId) -> String {
    format!("{}\\", drive)
}

fn from_wide(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len]).trim().to_string()
}

impl VolumeOps for WindowsHal {
    fn logical_drives(&self) -> HalResult<Vec<DriveId>> {
        let mask = unsafe { GetLogicalDrives() };
        if mask == 0 {
            return Err(HalError::Io(std::io::Error::last_os_error()));
        }
        Ok(('A'..='Z')
            .enumerate()
            .filter(|(idx, _)| mask & (1u32 << idx) != 0)
            .map(|(_, letter)| DriveId::new(format!("{}:", letter)))
            .collect())
    }

    fn is_removable(&self, drive: &DriveId) -> HalResult<bool> {
        let root = wide(&root_of(drive));
        let kind = unsafe { GetDriveTypeW(PCWSTR(root.as_ptr())) };
        Ok(kind == DRIVE_REMOVABLE)
    }

    fn volume_info(&self, drive: &DriveId) -> HalResult<VolumeInfo> {
        let root = root_of(drive);
        let wroot = wide(&root);
        let mut name_buf = [0u16; 261];
        let mut fs_buf = [0u16; 261];
        let mut flags = 0u32;

        unsafe {
            GetVolumeInformationW(
                PCWSTR(wroot.as_ptr()),
                Some(&mut name_buf),
                None,
                None,
                Some(&mut flags as *mut u32),
                Some(&mut fs_buf),
            )
        }
        .map_err(|e| HalError::Other(format!("GetVolumeInformationW failed for {}: {}", root, e)))?;

        Ok(VolumeInfo {
            filesystem: from_wide(&fs_buf),
            label: from_wide(&name_buf),
            read_only: flags & FILE_READ_ONLY_VOLUME != 0,
            root: Some(PathBuf::from(root)),
        })
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

impl ErrorModeOps for WindowsHal {
    fn suppress_critical_errors(&self) -> ErrorMode {
        ErrorMode(unsafe { SetErrorMode(SEM_FAILCRITICALERRORS) })
    }

    fn restore_error_mode(&self, previous: ErrorMode) {
        unsafe {
            SetErrorMode(THREAD_ERROR_MODE(previous.0));
        }
    }
}
