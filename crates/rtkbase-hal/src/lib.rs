//! RtkBase Hardware Abstraction Layer (HAL).
//!
//! Everything that touches host storage lives here: drive enumeration,
//! volume queries, marker-file probes and the process-wide critical-error
//! mode. Callers program against [`MediaHal`] so the locator can run against
//! [`FakeHal`] in tests.

pub mod error;
pub mod hal;
pub mod lsblk;

pub use error::{HalError, HalResult};
pub use hal::*;
