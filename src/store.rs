//! Persistence of the raw dataset as JSON and flattened CSV.

use std::fs;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::flatten::flatten;
use crate::model::{Dataset, ExerciseRecord};
use crate::output::write_json;
use crate::parser::parse_dataset;

pub const RAW_JSON_FILE: &str = "github_exercises.json";
pub const RAW_CSV_FILE: &str = "github_exercises.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPaths {
    pub json: PathBuf,
    pub csv: PathBuf,
}

/// Writes the dataset to `dir` as JSON and CSV, creating `dir` if needed.
#[tracing::instrument(skip(records), fields(count = records.len(), dir = %dir.display()))]
pub fn save(records: &[ExerciseRecord], dir: &Path) -> Result<SavedPaths> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let json = dir.join(RAW_JSON_FILE);
    write_json(&json, &records)?;
    info!(path = %json.display(), "Saved JSON");

    let csv = dir.join(RAW_CSV_FILE);
    write_csv(&csv, records)?;
    info!(path = %csv.display(), "Saved CSV");

    Ok(SavedPaths { json, csv })
}

/// Writes the flattened table with a header row, replacing any existing file.
pub fn write_csv(path: &Path, records: &[ExerciseRecord]) -> Result<()> {
    let table = flatten(records);
    debug!(
        columns = table.columns.len(),
        rows = table.rows.len(),
        "Flattened dataset"
    );

    let file = fs::File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    // records without any keys produce no columns and nothing to write
    if !table.columns.is_empty() {
        writer.write_record(&table.columns)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
    }
    writer.flush().map_err(|e| Error::io(path, e))?;

    Ok(())
}

/// Reads back a dataset previously written by [`save`].
pub fn load(path: &Path) -> Result<Dataset> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    parse_dataset(&bytes)
}
