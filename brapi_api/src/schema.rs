//! Runtime shape validation for JSON coming off the wire.
//!
//! Every resource type declares its shape through serde attributes and
//! implements [`Schema`]. Validation is structural: required keys must be
//! present, primitive types must match exactly, enumerations only accept
//! their declared values, and the only values ever filled in are declared
//! defaults. Nothing is coerced (no string-to-number parsing, no trimming).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A mismatch between a JSON value and the shape it was expected to have.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{schema} failed validation at {path}: {message}")]
pub struct SchemaViolation {
    /// Name of the schema that rejected the value.
    pub schema: &'static str,
    /// Location of the value inside the response, e.g. `result.data[2]`.
    pub path: String,
    pub message: String,
}

impl SchemaViolation {
    pub fn new(schema: &'static str, path: &str, message: impl Into<String>) -> Self {
        Self {
            schema,
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// A declared record shape that raw JSON can be validated against.
pub trait Schema: DeserializeOwned {
    /// Name reported in [`SchemaViolation::schema`].
    const NAME: &'static str;

    /// Refinements the structural shape cannot express. Runs after a
    /// successful structural parse.
    fn check(&self) -> Result<(), String> {
        Ok(())
    }

    /// Validates a candidate value at the root of a document.
    fn validate(candidate: &Value) -> Result<Self, SchemaViolation> {
        Self::validate_at(candidate, "$")
    }

    /// Validates a candidate value, reporting failures at `path`.
    fn validate_at(candidate: &Value, path: &str) -> Result<Self, SchemaViolation> {
        let record = <Self as Deserialize>::deserialize(candidate)
            .map_err(|e| SchemaViolation::new(Self::NAME, path, e.to_string()))?;
        record
            .check()
            .map_err(|msg| SchemaViolation::new(Self::NAME, path, msg))?;
        Ok(record)
    }
}

/// Validates every element of a collection, stopping at the first failure.
///
/// There is no partial-success result: one bad element rejects the whole
/// collection and no validated siblings are returned.
pub fn validate_all<S: Schema>(candidates: &[Value], path: &str) -> Result<Vec<S>, SchemaViolation> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| S::validate_at(candidate, &format!("{}[{}]", path, i)))
        .collect()
}

/// Deserializer for fields whose key must be present but whose value may be
/// `null`. Plain `Option` fields treat a missing key as `None`; routing the
/// field through `deserialize_with` turns a missing key into an error.
pub fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Deserializer for optional fields where an explicit `null` means the same as
/// an absent key. Pair with `#[serde(default)]`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
