// Workout history and catalog access

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{CatalogExercise, ExerciseEntry, UserProfile, WorkoutRecord};

pub use memory::InMemoryWorkoutStore;
pub use postgres::PgWorkoutStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Access to stored workout history, the exercise catalog and user profiles.
///
/// Every call reads a fresh snapshot; implementations hold no per-request state.
/// Workout lookups are always scoped to the owning user.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Completed workouts of `user_id` started at or after `since` (all of them when
    /// `since` is `None`), newest first, with entries in insertion order and each entry's
    /// catalog muscle group resolved.
    async fn list_completed_workouts(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<WorkoutRecord>, StoreError>;

    /// The whole catalog, ascending by name.
    async fn list_catalog_exercises(&self) -> Result<Vec<CatalogExercise>, StoreError>;

    /// Most recently created entry of `user_id` whose name contains `name_fragment`,
    /// compared case-insensitively.
    async fn last_exercise_entry(
        &self,
        user_id: Uuid,
        name_fragment: &str,
    ) -> Result<Option<ExerciseEntry>, StoreError>;

    /// Latest weighted entry per distinct exercise name, newest first, at most `limit`.
    async fn latest_weighted_entries(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ExerciseEntry>, StoreError>;

    async fn get_user_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError>;

    /// Overwrites the stored profile of `profile.user_id`. `false` when no such user.
    async fn update_user_profile(&self, profile: &UserProfile) -> Result<bool, StoreError>;

    async fn get_catalog_exercise(
        &self,
        exercise_id: Uuid,
    ) -> Result<Option<CatalogExercise>, StoreError>;

    /// Every workout of `user_id`, in progress or not, newest first.
    async fn list_workouts(&self, user_id: Uuid) -> Result<Vec<WorkoutRecord>, StoreError>;

    async fn get_workout(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
    ) -> Result<Option<WorkoutRecord>, StoreError>;

    /// Stores a new workout. Its exercises, if any, are ignored.
    async fn insert_workout(&self, workout: &WorkoutRecord) -> Result<(), StoreError>;

    /// Sets `ended_at` on a workout that is still in progress. `false` when the workout
    /// does not exist or has already ended.
    async fn end_workout(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        ended_at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    async fn insert_exercise_entry(&self, entry: &ExerciseEntry) -> Result<(), StoreError>;

    /// Removes a workout with its entries. `false` when there was nothing to delete.
    async fn delete_workout(&self, user_id: Uuid, workout_id: Uuid) -> Result<bool, StoreError>;
}
