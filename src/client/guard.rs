//! 保存并发保护
//!
//! A store accepts one save at a time. A second save issued while the first
//! is still pending is rejected instead of queued.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use crate::errors::ReportError;

#[derive(Debug, Default)]
pub struct SaveFlag {
    in_flight: AtomicBool,
}

/// Held for the duration of one save; clears the flag on drop
#[derive(Debug)]
pub struct SaveGuard<'a> {
    flag: &'a SaveFlag,
}

impl SaveFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn try_begin(&self) -> Result<SaveGuard<'_>, ReportError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Save rejected: another save is still pending");
            return Err(ReportError::save_in_flight(
                "A save is already in progress",
            ));
        }
        Ok(SaveGuard { flag: self })
    }

    /// Run `f` while holding the guard
    pub fn run<T>(&self, f: impl FnOnce() -> Result<T, ReportError>) -> Result<T, ReportError> {
        let _guard = self.try_begin()?;
        f()
    }
}

impl Drop for SaveGuard<'_> {
    fn drop(&mut self) {
        self.flag.in_flight.store(false, Ordering::Release);
    }
}
