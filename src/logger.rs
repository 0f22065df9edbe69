use crate::context::Context;
use crate::handler::Handler;
use crate::level::Level;
use crate::record::{CallSite, Record};
use crate::value::Attr;
use chrono::Utc;
use std::fmt;
use std::sync::Arc;

/// Front end application code logs through.
///
/// Cheap to clone; all state lives in the shared, immutable [`Handler`].
///
/// ```
/// use std::sync::Arc;
/// use structlog_adapter::{Attr, Logger, NoopLogger, TargetHandler};
///
/// let log = Logger::new(TargetHandler::new(Arc::new(NoopLogger), None));
/// let req = log.with_group("req").with([Attr::string("id", "r-7")]);
/// req.info("served", [Attr::int("status", 200)]);
/// ```
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl Logger {
    pub fn new(handler: impl Handler + 'static) -> Self {
        Logger {
            handler: Arc::new(handler),
        }
    }

    pub fn from_handler(handler: Arc<dyn Handler>) -> Self {
        Logger { handler }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Logger whose records all carry `attrs`.
    pub fn with(&self, attrs: impl IntoIterator<Item = Attr>) -> Logger {
        let attrs: Vec<Attr> = attrs.into_iter().collect();
        if attrs.is_empty() {
            return self.clone();
        }
        Logger::from_handler(self.handler.with_attrs(attrs))
    }

    /// Logger that nests later attributes under `name`. An empty name
    /// returns the logger unchanged.
    pub fn with_group(&self, name: &str) -> Logger {
        if name.is_empty() {
            return self.clone();
        }
        Logger::from_handler(self.handler.with_group(name))
    }

    pub fn enabled(&self, ctx: &Context, level: Level) -> bool {
        self.handler.enabled(ctx, level)
    }

    /// Log at `level` with the caller's file and line as call site.
    #[track_caller]
    pub fn log(
        &self,
        ctx: &Context,
        level: Level,
        message: impl Into<String>,
        attrs: impl IntoIterator<Item = Attr>,
    ) {
        self.log_at(ctx, CallSite::caller(), level, message, attrs);
    }

    /// Log with an explicit call site. Used by the logging macros.
    pub fn log_at(
        &self,
        ctx: &Context,
        call_site: CallSite,
        level: Level,
        message: impl Into<String>,
        attrs: impl IntoIterator<Item = Attr>,
    ) {
        if !self.enabled(ctx, level) {
            return;
        }
        self.emit_at(ctx, call_site, level, message, attrs);
    }

    /// Build and hand over a record without asking the handler whether
    /// `level` is enabled. The logging macros call this after their own check.
    #[doc(hidden)]
    pub fn emit_at(
        &self,
        ctx: &Context,
        call_site: CallSite,
        level: Level,
        message: impl Into<String>,
        attrs: impl IntoIterator<Item = Attr>,
    ) {
        let mut record = Record::new(Utc::now(), level, message).with_call_site(call_site);
        record.add_attrs(attrs);
        // Handler failures are not the caller's problem.
        let _ = self.handler.handle(ctx, record);
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(&Context::background(), Level::DEBUG, message, attrs);
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(&Context::background(), Level::INFO, message, attrs);
    }

    #[track_caller]
    pub fn warn(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(&Context::background(), Level::WARN, message, attrs);
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) {
        self.log(&Context::background(), Level::ERROR, message, attrs);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

/// Log through a [`Logger`] with `key => value` attributes.
///
/// The call site records `file!()`, `line!()` and `module_path!()`.
///
/// ```
/// # use std::sync::Arc;
/// # use structlog_adapter::{Level, Logger, NoopLogger, TargetHandler};
/// # let log = Logger::new(TargetHandler::new(Arc::new(NoopLogger), None));
/// structlog_adapter::log!(log, Level::WARN, "slow request", "elapsed_ms" => 950u64);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, ctx: $ctx:expr, $level:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {{
        let __logger = &$logger;
        let __ctx = &$ctx;
        let __level = $level;
        if __logger.enabled(__ctx, __level) {
            __logger.emit_at(
                __ctx,
                $crate::CallSite::new(file!(), line!(), module_path!()),
                __level,
                $msg,
                [$($crate::Attr::new($key, $value)),*],
            );
        }
    }};
    ($logger:expr, $level:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log!($logger, ctx: $crate::Context::background(), $level, $msg $(, $key => $value)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Level::DEBUG, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Level::INFO, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Level::WARN, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $crate::log!($logger, $crate::Level::ERROR, $($arg)*)
    };
}
