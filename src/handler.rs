use crate::context::Context;
use crate::error::Error;
use crate::level::Level;
use crate::record::Record;
use crate::value::Attr;
use std::sync::Arc;

/// Back end of the façade [`Logger`](crate::logger::Logger).
///
/// Handlers are immutable: `with_attrs` and `with_group` return a new
/// handler and leave the receiver as it was, so one handler can be shared
/// and derived from many threads at once.
pub trait Handler: Send + Sync {
    /// Whether a record at `level` would be emitted.
    fn enabled(&self, ctx: &Context, level: Level) -> bool;

    /// Emit one record.
    fn handle(&self, ctx: &Context, record: Record) -> Result<(), Error>;

    /// Handler that also carries `attrs` on every record.
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// Handler that nests all later attributes under `name`.
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}
