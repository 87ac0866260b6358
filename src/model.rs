//! Exercise records as received from the source.
//!
//! A record keeps the source object verbatim (key order included) so the raw
//! JSON and CSV outputs reproduce it exactly. The fields the rest of the crate
//! cares about are read through typed accessors that make the missing-field
//! policy explicit:
//!
//! | Shape in the source | `as_str` / named | `scalar`     | `value`      | `list`              |
//! |---------------------|------------------|--------------|--------------|---------------------|
//! | absent / `null`     | `None`           | `None`       | `None`       | empty               |
//! | string              | `Some(text)`     | `Some(text)` | `Some(v)`    | empty               |
//! | number / boolean    | `None`           | `Some(text)` | `Some(v)`    | empty               |
//! | array               | `None`           | `None`       | `Some(v)`    | its string elements |
//! | object              | `None`           | `None`       | `Some(v)`    | empty               |
//!
//! Matching (filter, lookup) goes through the string-only accessors, counting
//! uses `scalar`, and the reduced export passes `value` through unchanged.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const EQUIPMENT: &str = "equipment";
pub const LEVEL: &str = "level";
pub const PRIMARY_MUSCLES: &str = "primaryMuscles";
pub const SECONDARY_MUSCLES: &str = "secondaryMuscles";
pub const INSTRUCTIONS: &str = "instructions";
pub const CATEGORY: &str = "category";
pub const FORCE: &str = "force";
pub const MECHANIC: &str = "mechanic";

/// The full ordered collection of records from one fetch.
pub type Dataset = Vec<ExerciseRecord>;

/// One exercise entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseRecord {
    fields: Map<String, Value>,
}

impl ExerciseRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Raw access to every field, including ones this crate does not model.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Reads `key` only if it holds a JSON string.
    pub fn as_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key)?.as_str()
    }

    /// Any non-null value under `key`, as stored.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Reads `key` as a scalar, rendering numbers and booleans as text.
    pub fn scalar(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.fields.get(key)? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Reads `key` as a list of strings; anything else reads as empty.
    pub fn list(&self, key: &str) -> Vec<&str> {
        match self.fields.get(key) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.as_str(ID)
    }

    pub fn name(&self) -> Option<&str> {
        self.as_str(NAME)
    }

    pub fn equipment(&self) -> Option<&str> {
        self.as_str(EQUIPMENT)
    }

    pub fn level(&self) -> Option<&str> {
        self.as_str(LEVEL)
    }

    pub fn category(&self) -> Option<&str> {
        self.as_str(CATEGORY)
    }

    pub fn force(&self) -> Option<&str> {
        self.as_str(FORCE)
    }

    pub fn mechanic(&self) -> Option<&str> {
        self.as_str(MECHANIC)
    }

    pub fn primary_muscles(&self) -> Vec<&str> {
        self.list(PRIMARY_MUSCLES)
    }

    pub fn secondary_muscles(&self) -> Vec<&str> {
        self.list(SECONDARY_MUSCLES)
    }

    pub fn instructions(&self) -> Vec<&str> {
        self.list(INSTRUCTIONS)
    }
}

impl From<Map<String, Value>> for ExerciseRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}
