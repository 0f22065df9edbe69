use std::sync::Arc;

/// Ambient request context passed through to the target logger untouched.
///
/// Carries string key/values (request ids and the like) and, optionally, the
/// `tracing` span that was current when the context was captured. The adapter
/// never inspects it.
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: Option<Arc<Node>>,
    span: Option<tracing::Span>,
}

#[derive(Debug)]
struct Node {
    key: String,
    value: String,
    parent: Option<Arc<Node>>,
}

impl Context {
    /// Empty context.
    pub fn background() -> Self {
        Context::default()
    }

    /// Context bound to the current `tracing` span.
    pub fn current() -> Self {
        Context {
            values: None,
            span: Some(tracing::Span::current()),
        }
    }

    /// Derive a context that also carries `key = value`. The receiver is left
    /// unchanged.
    pub fn with_value(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Context {
            values: Some(Arc::new(Node {
                key: key.into(),
                value: value.into(),
                parent: self.values.clone(),
            })),
            span: self.span.clone(),
        }
    }

    pub fn with_span(&self, span: tracing::Span) -> Self {
        Context {
            values: self.values.clone(),
            span: Some(span),
        }
    }

    /// Most recently bound value for `key`.
    pub fn value(&self, key: &str) -> Option<&str> {
        let mut node = self.values.as_deref();
        while let Some(n) = node {
            if n.key == key {
                return Some(&n.value);
            }
            node = n.parent.as_deref();
        }
        None
    }

    pub fn span(&self) -> Option<&tracing::Span> {
        self.span.as_ref()
    }
}
