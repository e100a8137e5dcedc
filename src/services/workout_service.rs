use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    AddExerciseRequest, ExerciseEntry, StartWorkoutRequest, WorkoutRecord, DEFAULT_WORKOUT_NAME,
};
use crate::storage::{StoreError, WorkoutStore};

#[derive(Debug, thiserror::Error)]
pub enum WorkoutError {
    #[error("Workout not found")]
    NotFound,
    #[error("Workout has already ended")]
    AlreadyEnded,
    #[error("Exercise {0} is not in the catalog")]
    UnknownExercise(Uuid),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type WorkoutResult<T> = Result<T, WorkoutError>;

/// Logging of workouts: start, add exercises, finish, delete.
#[derive(Clone)]
pub struct WorkoutService {
    store: Arc<dyn WorkoutStore>,
}

impl WorkoutService {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    pub async fn list_workouts(&self, user_id: Uuid) -> WorkoutResult<Vec<WorkoutRecord>> {
        Ok(self.store.list_workouts(user_id).await?)
    }

    pub async fn get_workout(&self, user_id: Uuid, workout_id: Uuid) -> WorkoutResult<WorkoutRecord> {
        self.store
            .get_workout(user_id, workout_id)
            .await?
            .ok_or(WorkoutError::NotFound)
    }

    pub async fn start_workout(
        &self,
        user_id: Uuid,
        request: &StartWorkoutRequest,
    ) -> WorkoutResult<WorkoutRecord> {
        self.start_workout_at(user_id, request, Utc::now()).await
    }

    /// Same as [`Self::start_workout`] with an explicit clock.
    pub async fn start_workout_at(
        &self,
        user_id: Uuid,
        request: &StartWorkoutRequest,
        now: DateTime<Utc>,
    ) -> WorkoutResult<WorkoutRecord> {
        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_WORKOUT_NAME);

        let workout = WorkoutRecord {
            id: Uuid::new_v4(),
            user_id,
            name: name.to_string(),
            started_at: now,
            ended_at: None,
            exercises: Vec::new(),
        };
        self.store.insert_workout(&workout).await?;
        info!("User {} started workout {}", user_id, workout.id);

        Ok(workout)
    }

    pub async fn end_workout(&self, user_id: Uuid, workout_id: Uuid) -> WorkoutResult<WorkoutRecord> {
        self.end_workout_at(user_id, workout_id, Utc::now()).await
    }

    /// Same as [`Self::end_workout`] with an explicit clock.
    pub async fn end_workout_at(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        now: DateTime<Utc>,
    ) -> WorkoutResult<WorkoutRecord> {
        let mut workout = self.get_workout(user_id, workout_id).await?;
        if workout.is_completed() {
            return Err(WorkoutError::AlreadyEnded);
        }

        // Another request may have ended it since the read above.
        if !self.store.end_workout(user_id, workout_id, now).await? {
            return Err(WorkoutError::AlreadyEnded);
        }
        workout.ended_at = Some(now);
        info!(
            "User {} ended workout {} after {} minutes",
            user_id,
            workout_id,
            workout.duration_minutes().unwrap_or(0)
        );

        Ok(workout)
    }

    /// Appends an exercise after the existing ones and returns the updated workout.
    pub async fn add_exercise(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        request: AddExerciseRequest,
    ) -> WorkoutResult<WorkoutRecord> {
        let workout = self.get_workout(user_id, workout_id).await?;

        if let Some(exercise_id) = request.exercise_id {
            if self.store.get_catalog_exercise(exercise_id).await?.is_none() {
                return Err(WorkoutError::UnknownExercise(exercise_id));
            }
        }

        let entry = ExerciseEntry {
            id: Uuid::new_v4(),
            workout_id,
            exercise_id: request.exercise_id,
            name: request.name.trim().to_string(),
            sets: request.sets,
            reps: request.reps,
            weight: request.weight,
            duration_seconds: request.duration_seconds,
            position: workout.exercises.len() as i32 + 1,
            created_at: Utc::now(),
            muscle_group: None,
        };
        self.store.insert_exercise_entry(&entry).await?;

        self.get_workout(user_id, workout_id).await
    }

    pub async fn delete_workout(&self, user_id: Uuid, workout_id: Uuid) -> WorkoutResult<()> {
        if !self.store.delete_workout(user_id, workout_id).await? {
            return Err(WorkoutError::NotFound);
        }
        info!("User {} deleted workout {}", user_id, workout_id);

        Ok(())
    }
}
