//! Tagged host value variants.
//!
//! # Responsibility
//! - Represent every shape the host passes into snippet functions.
//! - Provide the textual rendering used by fallback formatting.
//!
//! # Invariants
//! - The variant set is closed; callers dispatch by pattern matching, never
//!   by runtime type inspection.
//! - Only `Int` and `Float` are numeric; `Bool` and `Null` are not.

use crate::model::number::Number;
use crate::model::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// One host value crossing the snippet call boundary.
///
/// The wire form is externally tagged with snake_case variant names, e.g.
/// `{"int": 42}`, `{"seq": [...]}`, `"null"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Absent value.
    Null,
    /// Boolean flag. Deliberately not numeric.
    Bool(bool),
    /// Signed integer scalar.
    Int(i64),
    /// Floating-point scalar.
    Float(f64),
    /// Text scalar.
    Text(String),
    /// Ordered mutable sequence.
    Seq(Vec<Value>),
    /// Key-value mapping with text keys.
    Map(BTreeMap<String, Value>),
    /// Structured record with a values accessor.
    Record(Record),
}

impl Value {
    /// Builds a text value from anything string-like.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Builds a sequence value from an iterator of values.
    pub fn seq(values: impl IntoIterator<Item = Value>) -> Self {
        Self::Seq(values.into_iter().collect())
    }

    /// Returns the numeric scalar for `Int`/`Float` variants.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Int(value) => Some(Number::Int(*value)),
            Self::Float(value) => Some(Number::Float(*value)),
            _ => None,
        }
    }

    /// Returns whether this value participates in numeric aggregation.
    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
            Self::Seq(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (index, (key, entry)) in entries.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {entry}")?;
                }
                write!(f, "}}")
            }
            Self::Record(record) => {
                write!(f, "[")?;
                for (index, item) in record.values().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::Seq(values)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self::Map(entries)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Int(value) => Self::Int(value),
            Number::Float(value) => Self::Float(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::model::number::Number;
    use crate::model::record::Record;
    use std::collections::BTreeMap;

    #[test]
    fn numeric_classification_covers_int_and_float_only() {
        assert_eq!(Value::Int(7).as_number(), Some(Number::Int(7)));
        assert_eq!(Value::Float(1.5).as_number(), Some(Number::Float(1.5)));

        assert!(!Value::Null.is_numeric());
        assert!(!Value::Bool(true).is_numeric());
        assert!(!Value::text("12").is_numeric());
        assert!(!Value::seq([Value::Int(1)]).is_numeric());
    }

    #[test]
    fn display_renders_scalars() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Float(3.5).to_string(), "3.5");
        assert_eq!(Value::text("test").to_string(), "test");
    }

    #[test]
    fn display_renders_containers() {
        let seq = Value::seq([Value::Int(1), Value::text("a")]);
        assert_eq!(seq.to_string(), "[1, a]");

        let mut entries = BTreeMap::new();
        entries.insert("a".to_string(), Value::Int(1));
        entries.insert("b".to_string(), Value::text("x"));
        assert_eq!(Value::Map(entries).to_string(), "{a: 1, b: x}");

        let record = Record::new(
            vec!["s1".to_string(), "s2".to_string()],
            vec![Value::text("v1"), Value::text("v2")],
        )
        .expect("record with matching shape");
        assert_eq!(Value::Record(record).to_string(), "[v1, v2]");
    }

    #[test]
    fn wire_shape_is_externally_tagged_snake_case() {
        let json = serde_json::to_value(Value::Int(42)).expect("serialize int");
        assert_eq!(json, serde_json::json!({"int": 42}));

        let json = serde_json::to_value(Value::seq([Value::Int(1), Value::Int(2)]))
            .expect("serialize seq");
        assert_eq!(json, serde_json::json!({"seq": [{"int": 1}, {"int": 2}]}));

        let json = serde_json::to_value(Value::Null).expect("serialize null");
        assert_eq!(json, serde_json::json!("null"));

        let decoded: Value =
            serde_json::from_value(serde_json::json!({"text": "abc"})).expect("decode text");
        assert_eq!(decoded, Value::text("abc"));
    }
}
