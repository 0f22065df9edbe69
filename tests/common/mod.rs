//! Shared utilities for integration tests.

use serde_json::Value;
use std::io;
use std::sync::{Arc, Mutex};
use structlog_adapter::{JsonLogger, TargetLevel};

/// In-memory `io::Write` that can be read back after logging.
#[derive(Clone, Default)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Buffer {
    /// Every line written so far, parsed as JSON.
    pub fn lines(&self) -> Vec<Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}

/// JSON target logger at `level` writing into a fresh buffer.
pub fn json_logger(level: TargetLevel) -> (Arc<JsonLogger>, Buffer) {
    let buffer = Buffer::default();
    let logger = Arc::new(JsonLogger::new(buffer.clone()));
    logger.set_level(level);
    (logger, buffer)
}

/// Drop the keys that legitimately differ between runs.
#[allow(dead_code)]
pub fn without_time(mut line: Value) -> Value {
    if let Some(object) = line.as_object_mut() {
        object.remove("time");
    }
    line
}
