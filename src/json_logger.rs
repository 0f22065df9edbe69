//! Line-delimited JSON target logger.

use crate::error::Error;
use crate::level::TargetLevel;
use crate::target::{Entry, TargetLogger};
use chrono::SecondsFormat;
use serde_json::{Map, Value};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Mutex;

const TIME_KEY: &str = "time";
const LEVEL_KEY: &str = "level";
const MESSAGE_KEY: &str = "msg";

/// [`TargetLogger`] writing one JSON object per entry.
///
/// Field keys sit at the top level next to `time`, `level` and `msg`; keys are
/// written in sorted order. A field that collides with one of those three is
/// renamed with a `fields.` prefix. Level and caller reporting can be changed
/// at any time and are honored by handlers already built on top of this
/// logger.
pub struct JsonLogger {
    level: AtomicU8,
    report_caller: AtomicBool,
    out: Mutex<Box<dyn Write + Send>>,
}

impl JsonLogger {
    /// Logger at `Info` writing to `out`.
    pub fn new(out: impl Write + Send + 'static) -> Self {
        JsonLogger {
            level: AtomicU8::new(TargetLevel::Info as u8),
            report_caller: AtomicBool::new(false),
            out: Mutex::new(Box::new(out)),
        }
    }

    pub fn stdout() -> Self {
        JsonLogger::new(io::stdout())
    }

    pub fn stderr() -> Self {
        JsonLogger::new(io::stderr())
    }

    pub fn set_level(&self, level: TargetLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    pub fn set_report_caller(&self, report_caller: bool) {
        self.report_caller.store(report_caller, Ordering::Relaxed);
    }

    /// Encode `entry` without writing it. The result has no trailing newline.
    pub fn format(&self, entry: &Entry) -> Result<Vec<u8>, Error> {
        let mut data = Map::with_capacity(entry.fields.len() + 3);
        for (key, value) in &entry.fields {
            data.insert(key.clone(), serde_json::to_value(value)?);
        }

        for key in [TIME_KEY, LEVEL_KEY, MESSAGE_KEY] {
            if let Some(clash) = data.remove(key) {
                data.insert(format!("fields.{}", key), clash);
            }
        }

        data.insert(
            TIME_KEY.to_string(),
            Value::String(entry.time.to_rfc3339_opts(SecondsFormat::Nanos, true)),
        );
        data.insert(LEVEL_KEY.to_string(), Value::String(entry.level.to_string()));
        data.insert(MESSAGE_KEY.to_string(), Value::String(entry.message.clone()));

        Ok(serde_json::to_vec(&Value::Object(data))?)
    }
}

impl TargetLogger for JsonLogger {
    fn level(&self) -> TargetLevel {
        TargetLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    fn report_caller(&self) -> bool {
        self.report_caller.load(Ordering::Relaxed)
    }

    fn write_entry(&self, entry: &Entry) -> Result<(), Error> {
        let mut line = self.format(entry)?;
        line.push(b'\n');

        let mut out = self.out.lock().map_err(|_| Error::Poisoned)?;
        out.write_all(&line)?;
        Ok(())
    }
}
