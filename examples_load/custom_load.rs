use std::sync::Arc;
use std::time::Instant;

use structlog_adapter::{Attr, HandlerOptions, Logger, NoopLogger, TargetHandler, Value};

fn main() {
    let opts = HandlerOptions::default()
        .with_add_source(true)
        .with_replace_attr(|_groups, attr| {
            if attr.key == "password" {
                None
            } else {
                Some(attr)
            }
        });

    let log = Logger::new(TargetHandler::new(Arc::new(NoopLogger), Some(opts)))
        .with([Attr::string("service", "auth"), Attr::string("password", "hunter2")])
        .with_group("request")
        .with_group("db");

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        log.error(
            "custom load test error",
            [
                Attr::new("iteration", i),
                Attr::new("row", Value::lazy(move || Value::group([Attr::new("id", i)]))),
            ],
        );
    }

    let elapsed = start.elapsed();
    println!("groups + source + rewrite: handled {} records in {:?} (~{:.0} rec/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
}
