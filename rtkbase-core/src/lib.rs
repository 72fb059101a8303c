//! RtkBase core library.
//!
//! `rtkbase-core` finds the Raspberry Pi boot partition among the removable
//! volumes attached to the host and writes the `system.txt` file that the
//! RtkBase first-boot script reads back with a shell.

pub mod defaults;
pub mod errors;
pub mod locator;
pub mod logging;
pub mod provision;
pub mod quoting;
pub mod serializer;
pub mod settings;
pub mod validation;

pub use errors::{ProvisionError, ValidationError, WriteError};
pub use settings::SettingsRecord;
