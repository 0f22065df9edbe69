use std::sync::Arc;

use structlog_adapter::{Attr, Context, Level, Logger, TargetHandler, TracingLogger};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let log = Logger::new(TargetHandler::new(Arc::new(TracingLogger::new()), None));

    let span = tracing::info_span!("request", id = 42);
    let ctx = Context::background().with_span(span);

    log.with_group("auth").log(
        &ctx,
        Level::ERROR,
        "authentication failed",
        [Attr::int("user_id", 42), Attr::string("reason", "invalid password")],
    );
}
