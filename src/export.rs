//! Reduced, fixed-field projection of the dataset for the Gymmando app.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::{Error, Result};
use crate::model::{
    CATEGORY, EQUIPMENT, ExerciseRecord, FORCE, ID, LEVEL, MECHANIC, NAME,
};
use crate::output::write_json;

/// The ten fields the app consumes.
///
/// Scalar fields carry the source value unchanged and serialize as `null`
/// when absent. List fields keep only their string elements and serialize as
/// `[]` when absent, `null`, or not a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReducedExercise {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub equipment: Option<Value>,
    pub level: Option<Value>,
    pub primary_muscles: Vec<String>,
    pub secondary_muscles: Vec<String>,
    pub instructions: Vec<String>,
    pub category: Option<Value>,
    pub force: Option<Value>,
    pub mechanic: Option<Value>,
}

impl From<&ExerciseRecord> for ReducedExercise {
    fn from(record: &ExerciseRecord) -> Self {
        let scalar = |key| record.value(key).cloned();

        Self {
            id: scalar(ID),
            name: scalar(NAME),
            equipment: scalar(EQUIPMENT),
            level: scalar(LEVEL),
            primary_muscles: owned(record.primary_muscles()),
            secondary_muscles: owned(record.secondary_muscles()),
            instructions: owned(record.instructions()),
            category: scalar(CATEGORY),
            force: scalar(FORCE),
            mechanic: scalar(MECHANIC),
        }
    }
}

fn owned(list: Vec<&str>) -> Vec<String> {
    list.into_iter().map(str::to_string).collect()
}

/// Projects every record; one output per input, same order.
pub fn export_reduced(records: &[ExerciseRecord]) -> Vec<ReducedExercise> {
    records.iter().map(ReducedExercise::from).collect()
}

/// Writes the projection as pretty-printed JSON, creating the parent
/// directory if needed.
pub fn write_reduced(reduced: &[ReducedExercise], path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }

    write_json(path, &reduced)?;
    info!(count = reduced.len(), path = %path.display(), "Exported reduced exercises");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: [&str; 10] = [
        "id",
        "name",
        "equipment",
        "level",
        "primaryMuscles",
        "secondaryMuscles",
        "instructions",
        "category",
        "force",
        "mechanic",
    ];

    fn records(value: Value) -> Vec<ExerciseRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_export_full_record() {
        let data = records(json!([{
            "name": "Bench Press",
            "force": "push",
            "level": "intermediate",
            "mechanic": "compound",
            "equipment": "barbell",
            "primaryMuscles": ["chest"],
            "secondaryMuscles": ["shoulders", "triceps"],
            "instructions": ["Lie down.", "Press."],
            "category": "strength",
            "images": ["Bench_Press/0.jpg"],
            "id": "Bench_Press"
        }]));

        let reduced = export_reduced(&data);
        assert_eq!(
            reduced[0],
            ReducedExercise {
                id: Some("Bench_Press".into()),
                name: Some("Bench Press".into()),
                equipment: Some("barbell".into()),
                level: Some("intermediate".into()),
                primary_muscles: vec!["chest".into()],
                secondary_muscles: vec!["shoulders".into(), "triceps".into()],
                instructions: vec!["Lie down.".into(), "Press.".into()],
                category: Some("strength".into()),
                force: Some("push".into()),
                mechanic: Some("compound".into()),
            }
        );
    }

    #[test]
    fn test_export_applies_defaults() {
        let data = records(json!([{"id": "x", "mechanic": null}, {}]));
        let reduced = export_reduced(&data);

        assert_eq!(reduced.len(), data.len());
        assert_eq!(reduced[0].id, Some(json!("x")));
        assert_eq!(reduced[0].mechanic, None);
        assert_eq!(reduced[1], ReducedExercise::default());
    }

    #[test]
    fn test_export_passes_non_string_scalars_through() {
        let data = records(json!([{"id": 42, "equipment": true, "level": 2.5}]));
        let value = serde_json::to_value(export_reduced(&data)).unwrap();

        assert_eq!(value[0]["id"], json!(42));
        assert_eq!(value[0]["equipment"], json!(true));
        assert_eq!(value[0]["level"], json!(2.5));
    }

    #[test]
    fn test_export_null_or_malformed_lists_become_empty() {
        let data = records(json!([{
            "primaryMuscles": null,
            "secondaryMuscles": "shoulders",
            "instructions": ["Step one.", 2, null, "Step two."]
        }]));
        let value = serde_json::to_value(export_reduced(&data)).unwrap();

        assert_eq!(value[0]["primaryMuscles"], json!([]));
        assert_eq!(value[0]["secondaryMuscles"], json!([]));
        assert_eq!(value[0]["instructions"], json!(["Step one.", "Step two."]));
    }

    #[test]
    fn test_serialized_field_set_is_fixed() {
        let data = records(json!([{"id": "x", "images": ["a.jpg"], "extra": {"k": 1}}]));
        let value = serde_json::to_value(export_reduced(&data)).unwrap();

        let object = value[0].as_object().unwrap();
        let keys: Vec<_> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, FIELDS);
        assert_eq!(object["name"], Value::Null);
        assert_eq!(object["primaryMuscles"], json!([]));
    }

    #[test]
    fn test_export_empty_dataset() {
        assert!(export_reduced(&[]).is_empty());
    }

    #[test]
    fn test_write_reduced() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("gymmando_exercises.json");
        let data = records(json!([{"id": "1", "name": "Ausfallschritt – Lunge"}]));

        write_reduced(&export_reduced(&data), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Ausfallschritt – Lunge"));
        let back: Vec<ReducedExercise> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, export_reduced(&data));
    }

    #[test]
    fn test_write_reduced_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out").join("nested").join("app.json");

        write_reduced(&[], &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_write_reduced_reports_directory_path_on_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not_a_dir");
        std::fs::write(&blocker, b"x").unwrap();

        let err = write_reduced(&[], &blocker.join("app.json")).unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path, blocker),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
