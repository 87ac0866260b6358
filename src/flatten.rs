//! Flattens nested records into a rectangular table for CSV output.
//!
//! Paths are built recursively: object members as `parent.child`, array
//! elements as `parent[i]`. Scalars become one cell (`null` is empty). An
//! empty array or object still yields its bare path with an empty cell, so
//! every top-level key gets at least one column.
//!
//! A top-level key that already contains a dot (`"a.b"`) shares its column
//! with the nested path `a` → `b`; the cell written later in document order
//! wins and the clash is logged.
//!
//! Columns are grouped by top-level key in first-seen order across the
//! dataset; inside a group, sub-paths keep their first-seen order. Cells a
//! record has no value for are empty.

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::warn;

use crate::model::ExerciseRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Flattens one record into `(path, cell)` pairs in document order.
pub fn flatten_record(record: &ExerciseRecord) -> Vec<(String, String)> {
    let mut cells = Vec::new();
    for (key, value) in record.fields() {
        flatten_value(key.clone(), value, &mut cells);
    }
    cells
}

fn flatten_value(path: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_value(format!("{path}.{key}"), child, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (i, child) in items.iter().enumerate() {
                flatten_value(format!("{path}[{i}]"), child, out);
            }
        }
        Value::String(s) => out.push((path, s.clone())),
        Value::Number(n) => out.push((path, n.to_string())),
        Value::Bool(b) => out.push((path, b.to_string())),
        Value::Null | Value::Object(_) | Value::Array(_) => out.push((path, String::new())),
    }
}

/// Column names the dataset flattens to, in table order.
pub fn columns(records: &[ExerciseRecord]) -> Vec<String> {
    let mut layout = ColumnLayout::default();
    for record in records {
        for (key, value) in record.fields() {
            let mut cells = Vec::new();
            flatten_value(key.clone(), value, &mut cells);
            layout.observe(key, cells.iter().map(|(path, _)| path.as_str()));
        }
    }
    layout.into_columns()
}

/// Flattens every record into one row of a shared column set.
pub fn flatten(records: &[ExerciseRecord]) -> Table {
    let mut layout = ColumnLayout::default();
    let mut flat_rows = Vec::with_capacity(records.len());

    for record in records {
        let mut row = HashMap::new();
        for (key, value) in record.fields() {
            let mut cells = Vec::new();
            flatten_value(key.clone(), value, &mut cells);
            layout.observe(key, cells.iter().map(|(path, _)| path.as_str()));
            for (path, cell) in cells {
                if row.insert(path.clone(), cell).is_some() {
                    warn!(column = %path, "Flattened path collides with an earlier key; keeping the later cell");
                }
            }
        }
        flat_rows.push(row);
    }

    let columns = layout.into_columns();
    let rows = flat_rows
        .into_iter()
        .map(|mut row| {
            columns
                .iter()
                .map(|column| row.remove(column).unwrap_or_default())
                .collect()
        })
        .collect();

    Table { columns, rows }
}

#[derive(Default)]
struct ColumnLayout {
    groups: Vec<(String, Vec<String>)>,
    group_index: HashMap<String, usize>,
    seen: HashSet<String>,
}

impl ColumnLayout {
    fn observe<'a>(&mut self, top: &str, paths: impl Iterator<Item = &'a str>) {
        let idx = match self.group_index.get(top) {
            Some(&idx) => idx,
            None => {
                self.groups.push((top.to_string(), Vec::new()));
                self.group_index.insert(top.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };

        for path in paths {
            if self.seen.insert(path.to_string()) {
                self.groups[idx].1.push(path.to_string());
            }
        }
    }

    fn into_columns(self) -> Vec<String> {
        self.groups.into_iter().flat_map(|(_, cols)| cols).collect()
    }
}
