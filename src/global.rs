//! Process-wide default [`Logger`].
//!
//! Until [`set_default`] is called, the default logger forwards to the
//! `tracing` subscriber installed in the process, through a
//! [`TargetHandler`] over [`TracingLogger`].

use crate::adapter::TargetHandler;
use crate::logger::Logger;
use crate::tracing_logger::TracingLogger;
use crate::value::Attr;
use std::sync::{Arc, OnceLock, RwLock};

fn slot() -> &'static RwLock<Option<Logger>> {
    static DEFAULT: OnceLock<RwLock<Option<Logger>>> = OnceLock::new();
    DEFAULT.get_or_init(|| RwLock::new(None))
}

/// Replace the default logger.
pub fn set_default(logger: Logger) {
    let mut slot = match slot().write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *slot = Some(logger);
}

/// Current default logger.
pub fn default_logger() -> Logger {
    {
        let slot = match slot().read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(logger) = slot.as_ref() {
            return logger.clone();
        }
    }

    let mut slot = match slot().write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    slot.get_or_insert_with(|| {
        Logger::new(TargetHandler::new(Arc::new(TracingLogger::new()), None))
    })
    .clone()
}

#[track_caller]
pub fn debug(message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
    default_logger().debug(message, attrs);
}

#[track_caller]
pub fn info(message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
    default_logger().info(message, attrs);
}

#[track_caller]
pub fn warn(message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
    default_logger().warn(message, attrs);
}

#[track_caller]
pub fn error(message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
    default_logger().error(message, attrs);
}
