use std::sync::Arc;

use structlog_adapter::{global, log_info, Attr, JsonLogger, Logger, TargetHandler, TargetLevel};

fn main() {
    // The target logger is configured by its owner; the handler only reads it.
    let json = Arc::new(JsonLogger::stdout());
    json.set_level(TargetLevel::Debug);

    let log = Logger::new(TargetHandler::new(json.clone(), None));

    log.debug("debug message", [Attr::string("key", "value")]);
    log.info("info message", [Attr::string("key", "value")]);
    log.warn("warn message", [Attr::string("key", "value")]);
    log.error("error message", [Attr::string("key", "value")]);

    log.with_group("req").error("failed", [Attr::int("code", 500)]);

    // Turning caller reporting on at the target makes new handlers attach
    // the call site under "source".
    json.set_report_caller(true);
    global::set_default(Logger::new(TargetHandler::new(json, None)));
    log_info!(global::default_logger(), "from the default logger", "attempt" => 2);
}
