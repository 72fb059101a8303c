//! HAL trait definitions and implementations.
//!
//! This module defines the traits the boot-medium scan is written against and
//! provides the real host backends alongside a fake one for tests.

pub mod error_mode_ops;
pub mod fake_hal;
pub mod guards;
#[cfg(unix)]
pub mod linux_hal;
pub mod volume_ops;
#[cfg(windows)]
pub mod windows_hal;

pub use error_mode_ops::{ErrorMode, ErrorModeOps};
pub use fake_hal::{FakeDrive, FakeHal, Operation};
pub use guards::CriticalErrorGuard;
#[cfg(unix)]
pub use linux_hal::LinuxHal;
pub use volume_ops::{DriveId, VolumeInfo, VolumeOps};
#[cfg(windows)]
pub use windows_hal::WindowsHal;

/// Complete HAL combining all traits the media scan needs.
pub trait MediaHal: VolumeOps + ErrorModeOps + Send + Sync {}

/// Automatically implement MediaHal for any type implementing all required traits.
impl<T> MediaHal for T where T: VolumeOps + ErrorModeOps + Send + Sync {}

/// The backend for the host this binary was built for.
#[cfg(unix)]
pub type HostHal = LinuxHal;

/// The backend for the host this binary was built for.
#[cfg(windows)]
pub type HostHal = WindowsHal;
