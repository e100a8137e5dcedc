#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use fitness_planner::models::{CatalogExercise, ExerciseEntry, WorkoutRecord};
use fitness_planner::storage::{InMemoryWorkoutStore, WorkoutStore};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Fixed clock used by tests that call the `_at` service variants.
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 18, 0, 0).unwrap()
}

pub fn catalog_exercise(name: &str, muscle_group: &str) -> CatalogExercise {
    CatalogExercise {
        id: Uuid::new_v4(),
        name: name.to_string(),
        muscle_group: Some(muscle_group.to_string()),
        description: Some(format!("{} ({})", name, muscle_group)),
        video_url: None,
    }
}

/// One catalog exercise per reference muscle group.
pub fn standard_catalog() -> Vec<CatalogExercise> {
    vec![
        catalog_exercise("Bench Press", "Chest"),
        catalog_exercise("Pull-up", "Back"),
        catalog_exercise("Squat", "Legs"),
        catalog_exercise("Shoulder Press", "Shoulders"),
        catalog_exercise("Bicep Curl", "Arms"),
        catalog_exercise("Plank", "Core"),
    ]
}

pub fn find<'a>(catalog: &'a [CatalogExercise], name: &str) -> &'a CatalogExercise {
    catalog
        .iter()
        .find(|exercise| exercise.name == name)
        .unwrap_or_else(|| panic!("{} missing from test catalog", name))
}

pub async fn store_with_catalog(catalog: &[CatalogExercise]) -> Arc<InMemoryWorkoutStore> {
    let store = Arc::new(InMemoryWorkoutStore::new());
    for exercise in catalog {
        store.add_catalog_exercise(exercise.clone()).await;
    }
    store
}

pub fn as_dyn(store: &Arc<InMemoryWorkoutStore>) -> Arc<dyn WorkoutStore> {
    store.clone()
}

/// Builds a completed workout, one hour long unless told otherwise.
pub struct WorkoutBuilder {
    record: WorkoutRecord,
}

impl WorkoutBuilder {
    pub fn new(user_id: Uuid, started_at: DateTime<Utc>) -> Self {
        Self {
            record: WorkoutRecord {
                id: Uuid::new_v4(),
                user_id,
                name: "Session".to_string(),
                started_at,
                ended_at: Some(started_at + Duration::minutes(60)),
                exercises: Vec::new(),
            },
        }
    }

    pub fn lasting(mut self, minutes: i64) -> Self {
        self.record.ended_at = Some(self.record.started_at + Duration::minutes(minutes));
        self
    }

    pub fn in_progress(mut self) -> Self {
        self.record.ended_at = None;
        self
    }

    /// Logs an exercise linked to `catalog` entry (or free text when `None`).
    pub fn exercise(
        mut self,
        name: &str,
        catalog: Option<&CatalogExercise>,
        reps: Option<i32>,
        weight: Option<Decimal>,
    ) -> Self {
        let position = self.record.exercises.len() as i32;
        self.record.exercises.push(ExerciseEntry {
            id: Uuid::new_v4(),
            workout_id: self.record.id,
            exercise_id: catalog.map(|exercise| exercise.id),
            name: name.to_string(),
            sets: Some(3),
            reps,
            weight,
            duration_seconds: None,
            position,
            created_at: self.record.started_at + Duration::minutes(i64::from(position) + 1),
            muscle_group: None,
        });
        self
    }

    /// Shorthand for an entry of a catalog exercise under its own name.
    pub fn catalog_exercise(self, exercise: &CatalogExercise) -> Self {
        let name = exercise.name.clone();
        self.exercise(&name, Some(exercise), Some(10), None)
    }

    pub fn build(self) -> WorkoutRecord {
        self.record
    }
}
