//! Structured logging handler that delegates to an existing logger.
//!
//! Application code logs through [`Logger`] with typed [`Attr`]ibutes and
//! named groups. A [`TargetHandler`] translates every [`Record`] into one
//! [`Entry`] for a [`TargetLogger`] it does not own: levels are mapped, bound
//! and record attributes are merged into a nested field tree, and the target's
//! own level, formatting and output are left alone.
//!
//! ```
//! use std::sync::Arc;
//! use structlog_adapter::{Attr, JsonLogger, Logger, TargetHandler, TargetLevel};
//!
//! let json = Arc::new(JsonLogger::stdout());
//! json.set_level(TargetLevel::Debug);
//!
//! let log = Logger::new(TargetHandler::new(json, None));
//! log.with_group("req").error("failed", [Attr::int("code", 500)]);
//! // {"level":"error","msg":"failed","req":{"code":500},"time":"..."}
//! ```

pub mod adapter;
pub mod context;
pub mod error;
pub mod field;
pub mod global;
pub mod handler;
#[cfg(feature = "json")]
pub mod json_logger;
pub mod level;
pub mod logger;
pub mod noop_logger;
pub mod options;
pub mod record;
pub mod target;
pub mod tracing_logger;
pub mod value;

pub use adapter::{TargetHandler, SOURCE_KEY};
pub use context::Context;
pub use error::Error;
pub use field::{FieldValue, Fields};
pub use handler::Handler;
#[cfg(feature = "json")]
pub use json_logger::JsonLogger;
pub use level::{Level, TargetLevel};
pub use logger::Logger;
pub use noop_logger::NoopLogger;
pub use options::{HandlerOptions, ReplaceAttr};
pub use record::{CallSite, Record};
pub use target::{Entry, TargetLogger};
pub use tracing_logger::TracingLogger;
pub use value::{Attr, Value};
