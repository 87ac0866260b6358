//! Ad hoc queries over a dataset: conjunctive filtering and name lookup.

use crate::model::{Dataset, ExerciseRecord};

/// Filter criteria. Every supplied criterion must match; an unset or empty
/// criterion is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub equipment: Option<String>,
    pub level: Option<String>,
    pub muscle: Option<String>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equipment(mut self, equipment: impl Into<String>) -> Self {
        self.equipment = Some(equipment.into());
        self
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn muscle(mut self, muscle: impl Into<String>) -> Self {
        self.muscle = Some(muscle.into());
        self
    }

    /// True when no criterion would restrict the result.
    pub fn is_empty(&self) -> bool {
        active(&self.equipment).is_none()
            && active(&self.level).is_none()
            && active(&self.muscle).is_none()
    }

    pub fn matches(&self, record: &ExerciseRecord) -> bool {
        if let Some(equipment) = active(&self.equipment) {
            if record.equipment() != Some(equipment) {
                return false;
            }
        }

        if let Some(level) = active(&self.level) {
            if record.level() != Some(level) {
                return false;
            }
        }

        if let Some(muscle) = active(&self.muscle) {
            if !record.primary_muscles().contains(&muscle) {
                return false;
            }
        }

        true
    }
}

fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|c| !c.is_empty())
}

/// Returns the records matching `criteria`, in their original order.
pub fn filter(records: &[ExerciseRecord], criteria: &Criteria) -> Dataset {
    if criteria.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

/// First record whose name contains `query`, ignoring case.
///
/// Records without a name never match, so an empty query yields the first
/// named record.
pub fn find_by_name<'a>(records: &'a [ExerciseRecord], query: &str) -> Option<&'a ExerciseRecord> {
    let needle = query.to_lowercase();

    records.iter().find(|record| match record.name() {
        Some(name) if !name.is_empty() => name.to_lowercase().contains(&needle),
        _ => false,
    })
}
