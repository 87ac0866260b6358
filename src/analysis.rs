//! Frequency breakdowns over the categorical fields of a dataset.
//!
//! Computation only; see [`crate::output`] for rendering.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::flatten;
use crate::model::{EQUIPMENT, ExerciseRecord, LEVEL, PRIMARY_MUSCLES};

/// Single-valued fields counted per record.
pub static CATEGORICAL_FIELDS: &[&str] = &[EQUIPMENT, LEVEL];

/// List-valued fields whose elements are pooled across records before counting.
pub static LIST_FIELDS: &[&str] = &[PRIMARY_MUSCLES];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Counts for one field, most frequent first; ties keep first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldBreakdown {
    pub field: String,
    pub counts: Vec<ValueCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub columns: Vec<String>,
    pub breakdowns: Vec<FieldBreakdown>,
}

impl Report {
    pub fn breakdown(&self, field: &str) -> Option<&FieldBreakdown> {
        self.breakdowns.iter().find(|b| b.field == field)
    }

    /// Count for `value` in `field`; `None` if the field was skipped or the value never seen.
    pub fn count(&self, field: &str, value: &str) -> Option<usize> {
        self.breakdown(field)?
            .counts
            .iter()
            .find(|c| c.value == value)
            .map(|c| c.count)
    }
}

/// Builds the report for the default field set. Fields no record carries are
/// left out rather than reported empty.
pub fn analyze(records: &[ExerciseRecord]) -> Report {
    let mut breakdowns = Vec::new();

    for &field in CATEGORICAL_FIELDS {
        if !records.iter().any(|r| r.contains(field)) {
            continue;
        }
        let values = records.iter().filter_map(|r| r.scalar(field));
        breakdowns.push(FieldBreakdown {
            field: field.to_string(),
            counts: count_values(values),
        });
    }

    for &field in LIST_FIELDS {
        if !records.iter().any(|r| r.contains(field)) {
            continue;
        }
        let values = records.iter().flat_map(|r| r.list(field));
        breakdowns.push(FieldBreakdown {
            field: field.to_string(),
            counts: count_values(values),
        });
    }

    Report {
        generated_at: Utc::now(),
        total: records.len(),
        columns: flatten::columns(records),
        breakdowns,
    }
}

fn count_values<S: AsRef<str>>(values: impl Iterator<Item = S>) -> Vec<ValueCount> {
    let mut counts: Vec<ValueCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for value in values {
        let value = value.as_ref();
        match index.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(value.to_string(), counts.len());
                counts.push(ValueCount {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
