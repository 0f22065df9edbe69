use crate::context::Context;
use crate::error::Error;
use crate::field::Fields;
use crate::level::TargetLevel;
use chrono::{DateTime, Utc};

/// One emission handed to a [`TargetLogger`].
#[derive(Debug, Clone)]
pub struct Entry {
    pub time: DateTime<Utc>,
    pub level: TargetLevel,
    pub message: String,
    pub fields: Fields,
    pub context: Context,
}

impl Entry {
    pub fn new(level: TargetLevel, message: impl Into<String>) -> Self {
        Entry {
            time: Utc::now(),
            level,
            message: message.into(),
            fields: Fields::new(),
            context: Context::background(),
        }
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    /// Merge `fields` into the entry; on a key clash the new value wins.
    pub fn with_fields(mut self, fields: Fields) -> Self {
        if self.fields.is_empty() {
            self.fields = fields;
        } else {
            self.fields.extend(fields);
        }
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }
}

/// Pre-configured logger the adapter delegates to.
///
/// The adapter only reads [`level`](TargetLogger::level) and
/// [`report_caller`](TargetLogger::report_caller) once, at construction, and
/// calls [`is_level_enabled`](TargetLogger::is_level_enabled) and
/// [`log`](TargetLogger::log) afterwards. It never changes the logger's
/// configuration.
///
/// Implementations are shared between threads and must do their own
/// synchronization.
pub trait TargetLogger: Send + Sync {
    /// Currently configured minimum severity.
    fn level(&self) -> TargetLevel;

    /// Whether an entry at `level` would be written right now.
    fn is_level_enabled(&self, level: TargetLevel) -> bool {
        level <= self.level()
    }

    /// Whether the logger is configured to report call sites.
    fn report_caller(&self) -> bool {
        false
    }

    /// Write a single entry, without level gating.
    ///
    /// **Returns**
    /// - `Ok(())` if the entry was written.
    /// - `Err(..)` if formatting or output failed.
    fn write_entry(&self, entry: &Entry) -> Result<(), Error>;

    /// Level-gated emission: entries below the current level are dropped.
    fn log(&self, entry: Entry) -> Result<(), Error> {
        if !self.is_level_enabled(entry.level) {
            return Ok(());
        }
        self.write_entry(&entry)
    }
}
