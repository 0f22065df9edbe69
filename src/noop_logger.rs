use crate::error::Error;
use crate::level::TargetLevel;
use crate::target::{Entry, TargetLogger};

/// A target logger that accepts every level and drops every entry.
///
/// Useful for measuring the overhead of the adapter itself without any
/// output, and for tests that don't care about what gets written.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl TargetLogger for NoopLogger {
    fn level(&self) -> TargetLevel {
        TargetLevel::Trace
    }

    fn write_entry(&self, _entry: &Entry) -> Result<(), Error> {
        Ok(())
    }
}
