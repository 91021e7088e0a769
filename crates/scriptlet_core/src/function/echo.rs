//! Echo snippet transformer.
//!
//! # Responsibility
//! - Tag container inputs with a fixed marker and hand them back.
//! - Extract the value collection from record inputs.
//! - Render every other shape through a fixed text prefix.
//!
//! # Invariants
//! - Evaluation never fails; unmatched shapes take the text branch.
//! - Sequence and mapping inputs keep their existing elements.

use crate::function::SnippetFunction;
use crate::model::value::Value;

/// Marker element appended to sequence inputs.
pub const ECHO_MARKER: &str = "py";
/// Value stored under the marker key for mapping inputs.
pub const ECHO_MARKER_VALUE: &str = "value";
/// Prefix for the fallback text rendering.
pub const ECHO_TEXT_PREFIX: &str = "py 1:";

/// Stateless per-value transformer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Echo;

impl Echo {
    pub fn new() -> Self {
        Self
    }
}

impl SnippetFunction for Echo {
    fn evaluate(&mut self, value: Value) -> Value {
        match value {
            Value::Seq(mut items) => {
                items.push(Value::text(ECHO_MARKER));
                Value::Seq(items)
            }
            Value::Map(mut entries) => {
                entries.insert(ECHO_MARKER.to_string(), Value::text(ECHO_MARKER_VALUE));
                Value::Map(entries)
            }
            Value::Record(record) => Value::Seq(record.into_values()),
            other => Value::text(format!("{ECHO_TEXT_PREFIX}{other}")),
        }
    }
}
