use crate::{ErrorMode, ErrorModeOps};
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard};

/// Serializes access to the critical-error mode, which is process-wide state.
static ERROR_MODE_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// RAII guard that keeps critical-error UI suppressed while it is alive.
///
/// The previous mode is restored when the guard drops, before the process-wide
/// lock is released.
#[derive(Debug)]
pub struct CriticalErrorGuard<'a, H: ErrorModeOps + ?Sized> {
    hal: &'a H,
    previous: ErrorMode,
    _lock: MutexGuard<'static, ()>,
}

impl<'a, H: ErrorModeOps + ?Sized> CriticalErrorGuard<'a, H> {
    pub fn acquire(hal: &'a H) -> Self {
        let lock = match ERROR_MODE_LOCK.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        let previous = hal.suppress_critical_errors();
        log::debug!("critical-error UI suppressed (previous mode {:#x})", previous.0);
        Self {
            hal,
            previous,
            _lock: lock,
        }
    }

    pub fn previous(&self) -> ErrorMode {
        self.previous
    }
}

impl<'a, H: ErrorModeOps + ?Sized> Drop for CriticalErrorGuard<'a, H> {
    fn drop(&mut self) {
        self.hal.restore_error_mode(self.previous);
        log::debug!("critical-error mode restored to {:#x}", self.previous.0);
    }
}
