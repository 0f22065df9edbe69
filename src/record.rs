use crate::level::Level;
use crate::value::Attr;
use chrono::{DateTime, Utc};
use std::panic::Location;

/// Where a log call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    /// Enclosing function or module path; empty when it could not be captured.
    pub function: &'static str,
}

impl CallSite {
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        CallSite { file, line, function }
    }

    /// Call site of the nearest caller not marked `#[track_caller]`.
    ///
    /// `Location` knows nothing about the enclosing function, so `function`
    /// is left empty. The logging macros fill it with `module_path!()`.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        CallSite::new(location.file(), location.line(), "")
    }
}

/// One log call: produced by the façade, consumed by a handler.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub call_site: Option<CallSite>,
    attrs: Vec<Attr>,
}

impl Record {
    pub fn new(time: DateTime<Utc>, level: Level, message: impl Into<String>) -> Self {
        Record {
            time,
            level,
            message: message.into(),
            call_site: None,
            attrs: Vec::new(),
        }
    }

    pub fn with_call_site(mut self, call_site: CallSite) -> Self {
        self.call_site = Some(call_site);
        self
    }

    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.attrs.extend(attrs);
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn num_attrs(&self) -> usize {
        self.attrs.len()
    }

    pub fn into_attrs(self) -> Vec<Attr> {
        self.attrs
    }
}
