//! Property Binder - injects string configuration into typed property slots
//!
//! Configuration maps are shared across heterogeneous targets, so a key
//! the target does not expose, or a value that does not coerce, is skipped
//! rather than reported.

use crate::domain::property::{normalize_key, Configurable};
use crate::domain::Parameters;

/// Tally of one binding pass, for diagnostics only
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BindOutcome {
    pub applied: usize,
    pub skipped: usize,
}

pub struct PropertyBinder;

impl PropertyBinder {
    /// Bind every key of `configuration` that `target` exposes.
    ///
    /// With `overwrite` off, slots already holding a non-default value are
    /// left alone.
    pub fn bind<T>(target: &mut T, configuration: &Parameters, overwrite: bool) -> BindOutcome
    where
        T: Configurable + ?Sized,
    {
        let mut outcome = BindOutcome::default();

        for (key, raw) in configuration {
            let Some(slot) = target.property(&normalize_key(key)) else {
                tracing::trace!(key = %key, "no property to bind");
                outcome.skipped += 1;
                continue;
            };

            if !overwrite && !slot.is_default() {
                outcome.skipped += 1;
                continue;
            }

            match slot.assign(raw) {
                Ok(()) => outcome.applied += 1,
                Err(e) => {
                    tracing::trace!(key = %key, error = %e, "property coercion failed");
                    outcome.skipped += 1;
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
#[path = "property_binder_test.rs"]
mod tests;
