//! Target logger backed by the `tracing` ecosystem.

use crate::error::Error;
use crate::field::DisplayFields;
use crate::level::TargetLevel;
use crate::target::{Entry, TargetLogger};
use chrono::SecondsFormat;
use tracing::level_filters::LevelFilter;

/// `tracing` target every forwarded entry is emitted under.
pub const TRACING_TARGET: &str = "structlog";

/// [`TargetLogger`] that emits every entry as a `tracing` event.
///
/// Level checks go to the current dispatcher each time, so reloading the
/// subscriber's filter is picked up without rebuilding the handler. The field
/// tree is rendered as text into a single `fields` value (`a=1 req={code=500}`,
/// keys sorted) and the entry time goes into `time`. `tracing` events have a
/// fixed set of field names, so structured subscribers such as JSON layers see
/// one string field, not the individual keys; use
/// [`JsonLogger`](crate::json_logger::JsonLogger) when keys must stay
/// machine-readable. When the entry's [`Context`](crate::Context) carries a span, the
/// event is emitted inside it.
///
/// `tracing` has no fatal or panic level: both are emitted at `ERROR`, and
/// neither exits nor panics.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger {
    report_caller: bool,
}

impl TracingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report_caller(mut self, report_caller: bool) -> Self {
        self.report_caller = report_caller;
        self
    }
}

impl TargetLogger for TracingLogger {
    fn level(&self) -> TargetLevel {
        let filter = LevelFilter::current();
        if filter >= LevelFilter::TRACE {
            TargetLevel::Trace
        } else if filter >= LevelFilter::DEBUG {
            TargetLevel::Debug
        } else if filter >= LevelFilter::INFO {
            TargetLevel::Info
        } else if filter >= LevelFilter::WARN {
            TargetLevel::Warn
        } else if filter >= LevelFilter::ERROR {
            TargetLevel::Error
        } else {
            TargetLevel::Panic
        }
    }

    fn is_level_enabled(&self, level: TargetLevel) -> bool {
        match level {
            TargetLevel::Panic | TargetLevel::Fatal | TargetLevel::Error => {
                tracing::enabled!(target: TRACING_TARGET, tracing::Level::ERROR)
            }
            TargetLevel::Warn => tracing::enabled!(target: TRACING_TARGET, tracing::Level::WARN),
            TargetLevel::Info => tracing::enabled!(target: TRACING_TARGET, tracing::Level::INFO),
            TargetLevel::Debug => tracing::enabled!(target: TRACING_TARGET, tracing::Level::DEBUG),
            TargetLevel::Trace => tracing::enabled!(target: TRACING_TARGET, tracing::Level::TRACE),
        }
    }

    fn report_caller(&self) -> bool {
        self.report_caller
    }

    fn write_entry(&self, entry: &Entry) -> Result<(), Error> {
        let _span = entry.context.span().map(|span| span.enter());
        let fields = DisplayFields(&entry.fields);
        let time = entry.time.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        let message = entry.message.as_str();

        macro_rules! emit {
            ($level:expr) => {
                tracing::event!(
                    target: TRACING_TARGET,
                    $level,
                    fields = %fields,
                    time = %time,
                    "{}",
                    message
                )
            };
        }

        match entry.level {
            TargetLevel::Panic | TargetLevel::Fatal | TargetLevel::Error => {
                emit!(tracing::Level::ERROR)
            }
            TargetLevel::Warn => emit!(tracing::Level::WARN),
            TargetLevel::Info => emit!(tracing::Level::INFO),
            TargetLevel::Debug => emit!(tracing::Level::DEBUG),
            TargetLevel::Trace => emit!(tracing::Level::TRACE),
        }
        Ok(())
    }
}
