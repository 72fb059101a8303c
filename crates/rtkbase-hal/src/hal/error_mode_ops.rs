//! Process-wide critical-error reporting mode.
//!
//! Windows pops a blocking "insert a disk" dialog when an empty card reader
//! is queried, unless the process opts out first. Hosts without such a
//! dialog implement this as a no-op.

/// Previous error mode, handed back on restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorMode(pub u32);

pub trait ErrorModeOps {
    /// Turn off the host's critical-error UI and return the mode it replaced.
    fn suppress_critical_errors(&self) -> ErrorMode;

    /// Put back a mode previously returned by [`suppress_critical_errors`].
    ///
    /// [`suppress_critical_errors`]: ErrorModeOps::suppress_critical_errors
    fn restore_error_mode(&self, previous: ErrorMode);
}
