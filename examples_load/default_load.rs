use std::sync::Arc;
use std::time::Instant;

use structlog_adapter::{Attr, Logger, NoopLogger, TargetHandler};

fn main() {
    let log = Logger::new(TargetHandler::new(Arc::new(NoopLogger), None));

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        log.error("default load test error", [Attr::new("iteration", i)]);
    }

    let elapsed = start.elapsed();
    println!("default options: handled {} records in {:?} (~{:.0} rec/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
}
