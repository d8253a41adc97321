//! Scoped, timed operations
//!
//! Wraps a fallible operation with trace logging of its entry, outcome and
//! duration as measured by the machine clock.

use crate::{Machine, error::Result};

/// What to do with a failure once it is logged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Log and suppress the failure, the caller carries on
    Safe,
    /// Log and propagate the failure
    Logged,
}

/// Run `op` as a logged, timed operation
///
/// Returns `Ok(None)` when a [`Guard::Safe`] operation failed. Interrupts
/// always propagate so shutdown can run.
pub fn timed<M, T, F>(machine: &mut M, label: &str, guard: Guard, op: F) -> Result<Option<T>>
where
    M: Machine,
    F: FnOnce(&mut M) -> Result<T>,
{
    log::trace!("{label}");
    let start = machine.now();

    let result = op(machine);
    let elapsed = machine.now().saturating_duration_since(start).as_millis();

    match result {
        Ok(value) => {
            log::trace!("{label}: complete in {elapsed}ms");
            Ok(Some(value))
        }
        Err(err) if err.is_interrupt() => Err(err),
        Err(err) => {
            log::error!("{label}: failed in {elapsed}ms: {err}");
            match guard {
                Guard::Safe => Ok(None),
                Guard::Logged => Err(err),
            }
        }
    }
}
