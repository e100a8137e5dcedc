use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Name given to a workout started without one.
pub const DEFAULT_WORKOUT_NAME: &str = "Workout";

/// A logged workout. `ended_at` is unset while the workout is in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub exercises: Vec<ExerciseEntry>,
}

impl WorkoutRecord {
    pub fn is_completed(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Whole minutes between start and end, truncated toward zero.
    pub fn duration_minutes(&self) -> Option<i64> {
        self.ended_at
            .map(|ended_at| (ended_at - self.started_at).num_minutes())
    }
}

/// One exercise performed within a workout.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExerciseEntry {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub exercise_id: Option<Uuid>,
    pub name: String,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight: Option<Decimal>,
    pub duration_seconds: Option<i32>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    /// Muscle group of the linked catalog exercise, when one is linked.
    pub muscle_group: Option<String>,
}

/// Row shape of the `workouts` table.
#[derive(Debug, Clone, FromRow)]
pub struct WorkoutRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl WorkoutRow {
    pub fn into_record(self, exercises: Vec<ExerciseEntry>) -> WorkoutRecord {
        WorkoutRecord {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            started_at: self.started_at,
            ended_at: self.ended_at,
            exercises,
        }
    }
}

/// Body of `POST /api/workouts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartWorkoutRequest {
    pub name: Option<String>,
}

/// Body of `POST /api/workouts/{id}/exercises`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddExerciseRequest {
    pub name: String,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight: Option<Decimal>,
    pub duration_seconds: Option<i32>,
    pub exercise_id: Option<Uuid>,
}

/// Workout as returned by the API, with its length precomputed.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutResponse {
    #[serde(flatten)]
    pub workout: WorkoutRecord,
    pub duration_minutes: Option<i64>,
}

impl From<WorkoutRecord> for WorkoutResponse {
    fn from(workout: WorkoutRecord) -> Self {
        Self {
            duration_minutes: workout.duration_minutes(),
            workout,
        }
    }
}
