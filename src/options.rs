use crate::level::Level;
use crate::value::Attr;
use std::fmt;
use std::sync::Arc;

/// Rewrite hook applied to every attribute before it is stored.
///
/// Receives the group path open at binding time (outermost first) and the
/// attribute; returns the attribute to store, or `None` to drop it.
pub type ReplaceAttr = Arc<dyn Fn(&[String], Attr) -> Option<Attr> + Send + Sync>;

/// Handler configuration.
///
/// **Fields**
/// - `level`: advisory only. The adapter replaces it with the target
///   logger's own level at construction.
/// - `add_source`: attach the call site of every record under
///   [`SOURCE_KEY`](crate::adapter::SOURCE_KEY). OR'd with the target
///   logger's caller-reporting flag.
/// - `replace_attr`: optional [`ReplaceAttr`] hook.
#[derive(Clone, Default)]
pub struct HandlerOptions {
    pub level: Level,
    pub add_source: bool,
    pub replace_attr: Option<ReplaceAttr>,
}

impl HandlerOptions {
    pub fn with_add_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    pub fn with_replace_attr<F>(mut self, f: F) -> Self
    where
        F: Fn(&[String], Attr) -> Option<Attr> + Send + Sync + 'static,
    {
        self.replace_attr = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for HandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerOptions")
            .field("level", &self.level)
            .field("add_source", &self.add_source)
            .field("replace_attr", &self.replace_attr.as_ref().map(|_| ".."))
            .finish()
    }
}
