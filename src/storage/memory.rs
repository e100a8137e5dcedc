use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, WorkoutStore};
use crate::models::{CatalogExercise, ExerciseEntry, UserProfile, WorkoutRecord};

#[derive(Debug, Default)]
struct MemoryData {
    workouts: Vec<WorkoutRecord>,
    catalog: Vec<CatalogExercise>,
    profiles: HashMap<Uuid, UserProfile>,
}

impl MemoryData {
    fn muscle_group_of(&self, exercise_id: Option<Uuid>) -> Option<String> {
        let exercise_id = exercise_id?;
        self.catalog
            .iter()
            .find(|exercise| exercise.id == exercise_id)
            .and_then(|exercise| exercise.muscle_group.clone())
    }

    fn resolved(&self, entry: &ExerciseEntry) -> ExerciseEntry {
        ExerciseEntry {
            muscle_group: self.muscle_group_of(entry.exercise_id),
            ..entry.clone()
        }
    }

    /// Copy of `workout` with entries in position order and muscle groups resolved.
    fn resolved_workout(&self, workout: &WorkoutRecord) -> WorkoutRecord {
        let mut exercises: Vec<ExerciseEntry> =
            workout.exercises.iter().map(|entry| self.resolved(entry)).collect();
        exercises.sort_by_key(|entry| entry.position);
        WorkoutRecord {
            exercises,
            ..workout.clone()
        }
    }

    fn owned_workout_mut(&mut self, user_id: Uuid, workout_id: Uuid) -> Option<&mut WorkoutRecord> {
        self.workouts
            .iter_mut()
            .find(|workout| workout.id == workout_id && workout.user_id == user_id)
    }

    fn user_entries(&self, user_id: Uuid) -> impl Iterator<Item = &ExerciseEntry> {
        self.workouts
            .iter()
            .filter(move |workout| workout.user_id == user_id)
            .flat_map(|workout| workout.exercises.iter())
    }
}

/// Process-local store. Backs the `memory` storage backend and the test suite.
#[derive(Debug, Default)]
pub struct InMemoryWorkoutStore {
    data: RwLock<MemoryData>,
}

impl InMemoryWorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_catalog_exercise(&self, exercise: CatalogExercise) {
        let mut data = self.data.write().await;
        data.catalog.push(exercise);
        data.catalog.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub async fn add_workout(&self, workout: WorkoutRecord) {
        self.data.write().await.workouts.push(workout);
    }

    pub async fn upsert_profile(&self, profile: UserProfile) {
        self.data
            .write()
            .await
            .profiles
            .insert(profile.user_id, profile);
    }
}

#[async_trait]
impl WorkoutStore for InMemoryWorkoutStore {
    async fn list_completed_workouts(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<WorkoutRecord>, StoreError> {
        let data = self.data.read().await;

        let mut workouts: Vec<WorkoutRecord> = data
            .workouts
            .iter()
            .filter(|workout| workout.user_id == user_id && workout.is_completed())
            .filter(|workout| since.map_or(true, |since| workout.started_at >= since))
            .map(|workout| data.resolved_workout(workout))
            .collect();

        workouts.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(workouts)
    }

    async fn list_catalog_exercises(&self) -> Result<Vec<CatalogExercise>, StoreError> {
        Ok(self.data.read().await.catalog.clone())
    }

    async fn last_exercise_entry(
        &self,
        user_id: Uuid,
        name_fragment: &str,
    ) -> Result<Option<ExerciseEntry>, StoreError> {
        let data = self.data.read().await;
        let needle = name_fragment.to_lowercase();

        Ok(data
            .user_entries(user_id)
            .filter(|entry| entry.name.to_lowercase().contains(&needle))
            .max_by_key(|entry| entry.created_at)
            .map(|entry| data.resolved(entry)))
    }

    async fn latest_weighted_entries(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ExerciseEntry>, StoreError> {
        let data = self.data.read().await;

        let mut latest: HashMap<&str, &ExerciseEntry> = HashMap::new();
        for entry in data.user_entries(user_id).filter(|entry| entry.weight.is_some()) {
            latest
                .entry(entry.name.as_str())
                .and_modify(|current| {
                    if entry.created_at > current.created_at {
                        *current = entry;
                    }
                })
                .or_insert(entry);
        }

        let mut entries: Vec<ExerciseEntry> =
            latest.into_values().map(|entry| data.resolved(entry)).collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(limit);

        Ok(entries)
    }

    async fn get_user_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.data.read().await.profiles.get(&user_id).cloned())
    }

    async fn update_user_profile(&self, profile: &UserProfile) -> Result<bool, StoreError> {
        let mut data = self.data.write().await;
        match data.profiles.get_mut(&profile.user_id) {
            Some(stored) => {
                *stored = profile.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_catalog_exercise(
        &self,
        exercise_id: Uuid,
    ) -> Result<Option<CatalogExercise>, StoreError> {
        let data = self.data.read().await;
        Ok(data
            .catalog
            .iter()
            .find(|exercise| exercise.id == exercise_id)
            .cloned())
    }

    async fn list_workouts(&self, user_id: Uuid) -> Result<Vec<WorkoutRecord>, StoreError> {
        let data = self.data.read().await;

        let mut workouts: Vec<WorkoutRecord> = data
            .workouts
            .iter()
            .filter(|workout| workout.user_id == user_id)
            .map(|workout| data.resolved_workout(workout))
            .collect();

        workouts.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(workouts)
    }

    async fn get_workout(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
    ) -> Result<Option<WorkoutRecord>, StoreError> {
        let data = self.data.read().await;
        Ok(data
            .workouts
            .iter()
            .find(|workout| workout.id == workout_id && workout.user_id == user_id)
            .map(|workout| data.resolved_workout(workout)))
    }

    async fn insert_workout(&self, workout: &WorkoutRecord) -> Result<(), StoreError> {
        self.add_workout(WorkoutRecord {
            exercises: Vec::new(),
            ..workout.clone()
        })
        .await;
        Ok(())
    }

    async fn end_workout(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        ended_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut data = self.data.write().await;
        match data.owned_workout_mut(user_id, workout_id) {
            Some(workout) if workout.ended_at.is_none() => {
                workout.ended_at = Some(ended_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn insert_exercise_entry(&self, entry: &ExerciseEntry) -> Result<(), StoreError> {
        let mut data = self.data.write().await;
        if let Some(workout) = data
            .workouts
            .iter_mut()
            .find(|workout| workout.id == entry.workout_id)
        {
            workout.exercises.push(ExerciseEntry {
                muscle_group: None,
                ..entry.clone()
            });
        }
        Ok(())
    }

    async fn delete_workout(&self, user_id: Uuid, workout_id: Uuid) -> Result<bool, StoreError> {
        let mut data = self.data.write().await;
        let before = data.workouts.len();
        data.workouts
            .retain(|workout| !(workout.id == workout_id && workout.user_id == user_id));
        Ok(data.workouts.len() < before)
    }
}
