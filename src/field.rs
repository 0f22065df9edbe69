//! Generic field tree handed to target loggers.
//!
//! [`flatten`] turns one typed [`Value`] into a [`FieldValue`], and
//! [`group_tree`] nests a flat [`Fields`] map under the open group path.

use crate::value::{AnyValue, Value};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// A deferred value that still yields another deferred value after this many
/// resolutions is treated as unresolvable.
pub const MAX_LOG_VALUER_DEPTH: usize = 100;

/// Field map for one emission. Key order is not significant.
pub type Fields = HashMap<String, FieldValue>;

/// Generic value stored in a [`Fields`] map.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(String),
    Duration(Duration),
    Time(DateTime<Utc>),
    Map(Fields),
    Any(AnyValue),
}

/// Convert a typed attribute value into a field value.
///
/// Groups become maps (a repeated child key keeps its last value) and
/// deferred values are resolved before conversion. Resolutions are counted
/// along the whole path, through nested groups.
///
/// # Panics
///
/// Panics when a deferred value cannot be reduced to a concrete kind within
/// [`MAX_LOG_VALUER_DEPTH`] resolutions. Dropping the attribute silently would
/// lose log data.
pub fn flatten(value: Value) -> FieldValue {
    flatten_at(value, 0)
}

fn flatten_at(value: Value, depth: usize) -> FieldValue {
    match value {
        Value::Bool(v) => FieldValue::Bool(v),
        Value::I64(v) => FieldValue::I64(v),
        Value::U64(v) => FieldValue::U64(v),
        Value::F64(v) => FieldValue::F64(v),
        Value::String(v) => FieldValue::String(v),
        Value::Duration(v) => FieldValue::Duration(v),
        Value::Time(v) => FieldValue::Time(v),
        Value::Group(attrs) => {
            let mut map = Fields::with_capacity(attrs.len());
            for attr in attrs {
                map.insert(attr.key, flatten_at(attr.value, depth));
            }
            FieldValue::Map(map)
        }
        Value::LogValuer(valuer) if depth < MAX_LOG_VALUER_DEPTH => {
            flatten_at(valuer.log_value(), depth + 1)
        }
        Value::Any(v) => FieldValue::Any(v),
        other => panic!(
            "bad kind: {} (still unresolved after {} resolutions)",
            other.kind(),
            depth
        ),
    }
}

/// Nest `attrs` under `groups`, outermost group first.
///
/// With no groups the map is returned as is; otherwise the result is a chain
/// of single-key maps ending in `attrs` under the last group name.
pub fn group_tree(groups: &[String], attrs: Fields) -> Fields {
    let Some((innermost, outer)) = groups.split_last() else {
        return attrs;
    };

    let mut tree = Fields::with_capacity(1);
    tree.insert(innermost.clone(), FieldValue::Map(attrs));
    for group in outer.iter().rev() {
        let mut parent = Fields::with_capacity(1);
        parent.insert(group.clone(), FieldValue::Map(tree));
        tree = parent;
    }
    tree
}

impl FieldValue {
    pub fn as_map(&self) -> Option<&Fields> {
        match self {
            FieldValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        use FieldValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a == b,
            (I64(a), I64(b)) => a == b,
            (U64(a), U64(b)) => a == b,
            (F64(a), F64(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Duration(a), Duration(b)) => a == b,
            (Time(a), Time(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            (Any(a), Any(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::I64(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<Fields> for FieldValue {
    fn from(v: Fields) -> Self {
        FieldValue::Map(v)
    }
}

fn rfc3339(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn sorted(map: &Fields) -> Vec<(&String, &FieldValue)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

/// Durations encode as integer nanoseconds, timestamps as RFC 3339 and opaque
/// values as their `Debug` text. Map keys are written in sorted order.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Bool(v) => serializer.serialize_bool(*v),
            FieldValue::I64(v) => serializer.serialize_i64(*v),
            FieldValue::U64(v) => serializer.serialize_u64(*v),
            FieldValue::F64(v) => serializer.serialize_f64(*v),
            FieldValue::String(v) => serializer.serialize_str(v),
            FieldValue::Duration(d) => {
                serializer.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            }
            FieldValue::Time(t) => serializer.serialize_str(&rfc3339(t)),
            FieldValue::Map(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in sorted(m) {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            FieldValue::Any(v) => serializer.collect_str(&format_args!("{:?}", v)),
        }
    }
}

/// Renders `key=value` pairs, nested maps in braces, keys sorted.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::I64(v) => write!(f, "{}", v),
            FieldValue::U64(v) => write!(f, "{}", v),
            FieldValue::F64(v) => write!(f, "{}", v),
            FieldValue::String(v) => {
                if v.is_empty() || v.contains(|c: char| c.is_whitespace() || c == '=' || c == '"') {
                    write!(f, "{:?}", v)
                } else {
                    f.write_str(v)
                }
            }
            FieldValue::Duration(v) => write!(f, "{:?}", v),
            FieldValue::Time(v) => f.write_str(&rfc3339(v)),
            FieldValue::Map(m) => write!(f, "{{{}}}", DisplayFields(m)),
            FieldValue::Any(v) => write!(f, "{:?}", v),
        }
    }
}

/// `Display` adapter for a whole field tree, without the outer braces.
pub struct DisplayFields<'a>(pub &'a Fields);

impl fmt::Display for DisplayFields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in sorted(self.0).into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", k, v)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Attr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn map(entries: impl IntoIterator<Item = (&'static str, FieldValue)>) -> FieldValue {
        FieldValue::Map(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn scalars_keep_their_kind() {
        let now = Utc::now();
        assert_eq!(flatten(Value::from(true)), FieldValue::Bool(true));
        assert_eq!(flatten(Value::from(-1)), FieldValue::I64(-1));
        assert_eq!(flatten(Value::from(7u64)), FieldValue::U64(7));
        assert_eq!(flatten(Value::from(0.5)), FieldValue::F64(0.5));
        assert_eq!(flatten(Value::from("s")), FieldValue::from("s"));
        assert_eq!(
            flatten(Value::from(Duration::from_secs(2))),
            FieldValue::Duration(Duration::from_secs(2))
        );
        assert_eq!(flatten(Value::from(now)), FieldValue::Time(now));
    }

    #[test]
    fn groups_become_nested_maps() {
        let value = Value::group([
            Attr::string("a", "1"),
            Attr::group("inner", [Attr::int("b", 2)]),
            Attr::string("a", "3"),
        ]);

        assert_eq!(
            flatten(value),
            map([
                ("a", FieldValue::from("3")),
                ("inner", map([("b", FieldValue::I64(2))])),
            ])
        );
    }

    #[test]
    fn deferred_values_are_resolved() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let value = Value::lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Value::lazy(|| Value::group([Attr::int("id", 42)]))
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(flatten(value), map([("id", FieldValue::I64(42))]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn any_passes_through() {
        let payload = AnyValue::new(vec!["x", "y"]);
        let FieldValue::Any(out) = flatten(Value::Any(payload.clone())) else {
            panic!("expected opaque value");
        };
        assert!(out.ptr_eq(&payload));
    }

    struct Endless;

    impl crate::value::LogValuer for Endless {
        fn log_value(&self) -> Value {
            Value::LogValuer(Arc::new(Endless))
        }
    }

    #[test]
    #[should_panic(expected = "bad kind: LogValuer")]
    fn unresolvable_deferred_value_panics() {
        flatten(Value::LogValuer(Arc::new(Endless)));
    }

    struct SelfNesting;

    impl crate::value::LogValuer for SelfNesting {
        fn log_value(&self) -> Value {
            Value::group([Attr::new("again", Value::LogValuer(Arc::new(SelfNesting)))])
        }
    }

    #[test]
    #[should_panic(expected = "bad kind: LogValuer")]
    fn deferred_value_nesting_itself_in_a_group_panics() {
        flatten(Value::LogValuer(Arc::new(SelfNesting)));
    }

    #[test]
    fn deferred_values_inside_groups_resolve() {
        let value = Value::lazy(|| {
            Value::group([Attr::new("inner", Value::lazy(|| Value::from("done")))])
        });
        assert_eq!(flatten(value), map([("inner", FieldValue::from("done"))]));
    }

    #[test]
    fn times_and_durations_serialize_without_derives() {
        let at = DateTime::parse_from_rfc3339("2024-05-01T12:00:00.5Z")
            .unwrap()
            .with_timezone(&Utc);
        let mut fields = Fields::new();
        fields.insert("at".into(), FieldValue::Time(at));
        fields.insert("took".into(), FieldValue::Duration(Duration::from_millis(3)));

        let json = serde_json::to_string(&FieldValue::Map(fields)).unwrap();
        assert_eq!(json, r#"{"at":"2024-05-01T12:00:00.500Z","took":3000000}"#);
    }

    #[test]
    fn empty_group_path_returns_map_unchanged() {
        let mut attrs = Fields::new();
        attrs.insert("k".into(), "v".into());
        assert_eq!(group_tree(&[], attrs.clone()), attrs);
    }

    #[test]
    fn group_path_nests_outermost_first() {
        let mut attrs = Fields::new();
        attrs.insert("k".into(), "v".into());
        let groups = vec!["g1".to_string(), "g2".to_string()];

        let tree = group_tree(&groups, attrs);
        assert_eq!(
            FieldValue::Map(tree),
            map([("g1", map([("g2", map([("k", FieldValue::from("v"))]))]))])
        );
    }

    #[test]
    fn display_sorts_and_quotes() {
        let mut fields = Fields::new();
        fields.insert("b".into(), "two words".into());
        fields.insert("a".into(), map([("z", FieldValue::I64(1)), ("y", FieldValue::Bool(true))]));
        assert_eq!(DisplayFields(&fields).to_string(), r#"a={y=true z=1} b="two words""#);
    }
}
