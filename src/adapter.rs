use crate::context::Context;
use crate::error::Error;
use crate::field::{flatten, group_tree, FieldValue, Fields};
use crate::handler::Handler;
use crate::level::{from_target_level, to_target_level, Level};
use crate::options::HandlerOptions;
use crate::record::{CallSite, Record};
use crate::target::{Entry, TargetLogger};
use crate::value::Attr;
use std::fmt;
use std::sync::Arc;

/// Root key under which the call site is attached when source capture is on.
pub const SOURCE_KEY: &str = "source";

/// [`Handler`] that forwards records to a [`TargetLogger`] it does not own.
///
/// The target's level, formatter and output are never touched: its level and
/// caller flag are read once in [`TargetHandler::new`] and every record is
/// handed over as a single [`Entry`].
///
/// Derived handlers (`with_attrs`, `with_group`) share the target logger but
/// own a private copy of the bound attributes and group path.
#[derive(Clone)]
pub struct TargetHandler {
    opts: HandlerOptions,
    logger: Arc<dyn TargetLogger>,
    attributes: Fields,
    groups: Vec<String>,
}

impl TargetHandler {
    /// Wrap `logger`.
    ///
    /// `opts.level` is overwritten with the logger's level, mapped onto the
    /// façade scale, and `opts.add_source` is enabled when the logger itself
    /// reports callers.
    pub fn new(logger: Arc<dyn TargetLogger>, opts: Option<HandlerOptions>) -> Self {
        let mut opts = opts.unwrap_or_default();
        opts.level = from_target_level(logger.level());
        opts.add_source = logger.report_caller() || opts.add_source;

        TargetHandler {
            opts,
            logger,
            attributes: Fields::new(),
            groups: Vec::new(),
        }
    }

    pub fn options(&self) -> &HandlerOptions {
        &self.opts
    }

    /// Open groups, outermost first.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Bound attributes, already flattened.
    pub fn attributes(&self) -> &Fields {
        &self.attributes
    }

    /// Copy of this handler with `attrs` bound. Later keys overwrite earlier
    /// ones, including keys bound by ancestors.
    pub fn derive_attrs(&self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        let attrs = attrs.into_iter();
        let mut attributes = clone_with_headroom(&self.attributes, attrs.size_hint().0);
        for attr in attrs {
            self.insert_attr(&mut attributes, attr);
        }

        TargetHandler {
            opts: self.opts.clone(),
            logger: Arc::clone(&self.logger),
            attributes,
            groups: self.groups.clone(),
        }
    }

    /// Copy of this handler with `name` appended to the group path.
    pub fn derive_group(&self, name: impl Into<String>) -> Self {
        let mut groups = Vec::with_capacity(self.groups.len() + 1);
        groups.extend_from_slice(&self.groups);
        groups.push(name.into());

        TargetHandler {
            opts: self.opts.clone(),
            logger: Arc::clone(&self.logger),
            attributes: self.attributes.clone(),
            groups,
        }
    }

    /// Run the rewrite hook (if any) and store the flattened value.
    fn insert_attr(&self, attributes: &mut Fields, attr: Attr) {
        let attr = match &self.opts.replace_attr {
            Some(replace) => match replace(&self.groups, attr) {
                Some(attr) => attr,
                None => return,
            },
            None => attr,
        };
        attributes.insert(attr.key, flatten(attr.value));
    }

    /// Field tree for one record: bound attributes, then the record's own,
    /// nested under the group path, with the call site at the root.
    fn fields_for(&self, call_site: Option<CallSite>, attrs: Vec<Attr>) -> Fields {
        let extra = attrs.len() + usize::from(self.opts.add_source);
        let mut attributes = clone_with_headroom(&self.attributes, extra);
        for attr in attrs {
            self.insert_attr(&mut attributes, attr);
        }

        let mut fields = group_tree(&self.groups, attributes);

        // root level, never inside a group
        if self.opts.add_source {
            if let Some(site) = call_site {
                fields.insert(SOURCE_KEY.to_string(), source_value(&site));
            }
        }
        fields
    }
}

impl Handler for TargetHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        self.logger.is_level_enabled(to_target_level(level))
    }

    fn handle(&self, ctx: &Context, mut record: Record) -> Result<(), Error> {
        let level = to_target_level(record.level);
        let time = record.time;
        let call_site = record.call_site;
        let message = std::mem::take(&mut record.message);
        let fields = self.fields_for(call_site, record.into_attrs());

        let entry = Entry::new(level, message)
            .with_time(time)
            .with_fields(fields)
            .with_context(ctx.clone());

        // Write failures stay inside the target logger.
        let _ = self.logger.log(entry);
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        Arc::new(self.derive_attrs(attrs))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(self.derive_group(name))
    }
}

impl fmt::Debug for TargetHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetHandler")
            .field("opts", &self.opts)
            .field("attributes", &self.attributes)
            .field("groups", &self.groups)
            .finish_non_exhaustive()
    }
}

fn clone_with_headroom(map: &Fields, extra: usize) -> Fields {
    let mut copy = Fields::with_capacity(map.len() + extra);
    copy.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
    copy
}

fn source_value(site: &CallSite) -> FieldValue {
    let mut source = Fields::with_capacity(3);
    source.insert("file".to_string(), FieldValue::from(site.file));
    source.insert("line".to_string(), FieldValue::String(site.line.to_string()));
    source.insert("function".to_string(), FieldValue::from(site.function));
    FieldValue::Map(source)
}
