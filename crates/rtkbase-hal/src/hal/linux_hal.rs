//! Linux HAL implementation backed by `lsblk` and `statvfs`.

use super::{DriveId, ErrorMode, ErrorModeOps, VolumeInfo, VolumeOps};
use crate::lsblk::parse_output;
use crate::{HalError, HalResult};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

/// Real HAL implementation for Linux systems.
#[derive(Debug, Clone, Default)]
pub struct LinuxHal;

impl LinuxHal {
    pub fn new() -> Self {
        Self
    }
}

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

fn map_command_err(program: &str, err: std::io::Error) -> HalError {
    if err.kind() == std::io::ErrorKind::NotFound {
        return HalError::CommandNotFound(program.to_string());
    }
    HalError::Io(err)
}

fn output_failed(program: &str, output: &Output) -> HalError {
    HalError::CommandFailed {
        program: program.to_string(),
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

fn output_with_timeout(program: &str, cmd: &mut Command, timeout: Duration) -> HalResult<Output> {
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    let mut child = cmd.spawn().map_err(|e| map_command_err(program, e))?;

    let mut stdout = child.stdout.take();
    let mut stderr = child.stderr.take();

    // Drain pipes concurrently to avoid deadlocks on large output.
    let stdout_handle = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout.take() {
            let _ = out.read_to_end(&mut buf);
        }
        buf
    });
    let stderr_handle = std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr.take() {
            let _ = err.read_to_end(&mut buf);
        }
        buf
    });

    let status = match child.wait_timeout(timeout).map_err(HalError::Io)? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            let _ = stdout_handle.join();
            let _ = stderr_handle.join();
            return Err(HalError::CommandTimeout {
                program: program.to_string(),
                timeout_secs: timeout.as_secs(),
            });
        }
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

fn map_nix_err(err: nix::errno::Errno) -> HalError {
    use nix::errno::Errno;
    match err {
        Errno::EACCES | Errno::EPERM => HalError::PermissionDenied,
        other => HalError::Nix(other),
    }
}

fn lsblk(args: &[&str]) -> HalResult<String> {
    let mut cmd = Command::new("lsblk");
    cmd.args(args);
    let output = output_with_timeout("lsblk", &mut cmd, PROBE_TIMEOUT)?;

    if !output.status.success() {
        return Err(output_failed("lsblk", &output));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// One `lsblk --nodeps` row for a single device.
fn lsblk_row(columns: &str, drive: &DriveId) -> HalResult<HashMap<String, String>> {
    let device = format!("/dev/{}", drive);
    let out = lsblk(&["--pairs", "--nodeps", "--output", columns, &device])?;
    parse_output(&out)
        .into_iter()
        .next()
        .ok_or_else(|| HalError::Parse(format!("lsblk printed nothing for {}", device)))
}

fn field<'a>(row: &'a HashMap<String, String>, key: &str) -> &'a str {
    row.get(key).map(String::as_str).unwrap_or("")
}

/// Name the filesystem the way the boot signature expects it.
///
/// lsblk reports every FAT flavour as `vfat` and puts the width in FSVER.
pub(crate) fn filesystem_name(fstype: &str, fsver: &str) -> String {
    match fstype {
        "vfat" if !fsver.is_empty() => fsver.to_ascii_uppercase(),
        other => other.to_ascii_uppercase(),
    }
}

/// Converts a `FSTYPE,FSVER,LABEL,RO,MOUNTPOINT` row into [`VolumeInfo`].
pub(crate) fn volume_from_row(row: &HashMap<String, String>) -> VolumeInfo {
    let mount_point = field(row, "MOUNTPOINT");
    VolumeInfo {
        filesystem: filesystem_name(field(row, "FSTYPE"), field(row, "FSVER")),
        label: field(row, "LABEL").to_string(),
        read_only: field(row, "RO") == "1",
        root: if mount_point.is_empty() {
            None
        } else {
            Some(PathBuf::from(mount_point))
        },
    }
}

fn mounted_read_only(root: &Path) -> HalResult<bool> {
    use nix::sys::statvfs::{statvfs, FsFlags};
    let st = statvfs(root).map_err(map_nix_err)?;
    Ok(st.flags().contains(FsFlags::ST_RDONLY))
}

impl VolumeOps for LinuxHal {
    fn logical_drives(&self) -> HalResult<Vec<DriveId>> {
        let out = lsblk(&["--pairs", "--list", "--output", "NAME,TYPE"])?;
        let mut drives: Vec<DriveId> = parse_output(&out)
            .iter()
            .filter(|row| matches!(field(row, "TYPE"), "disk" | "part"))
            .map(|row| field(row, "NAME"))
            .filter(|name| !name.is_empty())
            .map(DriveId::new)
            .collect();
        drives.sort();
        drives.dedup();
        Ok(drives)
    }

    fn is_removable(&self, drive: &DriveId) -> HalResult<bool> {
        let row = lsblk_row("RM,HOTPLUG", drive)?;
        Ok(field(&row, "RM") == "1" || field(&row, "HOTPLUG") == "1")
    }

    fn volume_info(&self, drive: &DriveId) -> HalResult<VolumeInfo> {
        let row = lsblk_row("FSTYPE,FSVER,LABEL,RO,MOUNTPOINT", drive)?;
        let mut info = volume_from_row(&row);
        if !info.read_only {
            if let Some(root) = info.root.as_deref() {
                info.read_only = mounted_read_only(root)?;
            }
        }
        Ok(info)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

impl ErrorModeOps for LinuxHal {
    fn suppress_critical_errors(&self) -> ErrorMode {
        // Linux has no blocking "insert disk" dialog to suppress.
        ErrorMode::default()
    }

    fn restore_error_mode(&self, _previous: ErrorMode) {}
}
