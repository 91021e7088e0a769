//! Structured record value with a values accessor.
//!
//! # Responsibility
//! - Pair parallel field-name and value lists under one shape invariant.
//! - Expose the values collection snippet functions extract.
//!
//! # Invariants
//! - `field_names` and `values` always have equal length.
//! - Field order is the authoritative value order.

use crate::model::value::Value;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Structured record exchanged with the host in place of plain containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    field_names: Vec<String>,
    values: Vec<Value>,
}

impl Record {
    /// Creates a record from parallel field-name and value lists.
    ///
    /// # Errors
    /// - Returns [`RecordShapeError::FieldCountMismatch`] when the lists
    ///   have different lengths.
    pub fn new(field_names: Vec<String>, values: Vec<Value>) -> Result<Self, RecordShapeError> {
        if field_names.len() != values.len() {
            return Err(RecordShapeError::FieldCountMismatch {
                field_names: field_names.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            field_names,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Declared field names in value order.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// The contained value collection.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consumes the record and returns its value collection.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Returns the position of `field_name`, if declared.
    pub fn field_index(&self, field_name: &str) -> Option<usize> {
        self.field_names.iter().position(|name| name == field_name)
    }

    /// Returns the value stored under `field_name`, if declared.
    pub fn value_by_field(&self, field_name: &str) -> Option<&Value> {
        self.field_index(field_name).map(|index| &self.values[index])
    }
}

/// Record construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShapeError {
    FieldCountMismatch { field_names: usize, values: usize },
}

impl Display for RecordShapeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldCountMismatch {
                field_names,
                values,
            } => write!(
                f,
                "record declares {field_names} field name(s) but holds {values} value(s)"
            ),
        }
    }
}

impl Error for RecordShapeError {}

#[cfg(test)]
mod tests {
    use super::{Record, RecordShapeError};
    use crate::model::value::Value;

    fn sample_record() -> Record {
        Record::new(
            vec!["s1".to_string(), "s2".to_string()],
            vec![Value::text("v1"), Value::text("v2")],
        )
        .expect("record with matching shape")
    }

    #[test]
    fn exposes_values_in_field_order() {
        let record = sample_record();
        assert_eq!(record.len(), 2);
        assert_eq!(record.values(), &[Value::text("v1"), Value::text("v2")]);
        assert_eq!(
            record.into_values(),
            vec![Value::text("v1"), Value::text("v2")]
        );
    }

    #[test]
    fn looks_up_values_by_field_name() {
        let record = sample_record();
        assert_eq!(record.field_index("s2"), Some(1));
        assert_eq!(record.value_by_field("s1"), Some(&Value::text("v1")));
        assert_eq!(record.value_by_field("missing"), None);
    }

    #[test]
    fn rejects_mismatched_field_and_value_counts() {
        let err = Record::new(vec!["only".to_string()], vec![]).expect_err("shape mismatch");
        assert_eq!(
            err,
            RecordShapeError::FieldCountMismatch {
                field_names: 1,
                values: 0
            }
        );
        assert!(err.to_string().contains("1 field name(s)"));
    }
}
