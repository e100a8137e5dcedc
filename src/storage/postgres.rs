use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::{StoreError, WorkoutStore};
use crate::models::{
    CatalogExercise, ExerciseEntry, UserProfile, UserProfileRow, WorkoutRecord, WorkoutRow,
};

const WORKOUT_COLUMNS: &str = "id, user_id, name, started_at, ended_at";

const PROFILE_COLUMNS: &str = r#"
    id, email, name, height_cm, weight_kg, gender, date_of_birth, fitness_goal,
    activity_level, profile_image_url, updated_at
"#;

const ENTRY_COLUMNS: &str = r#"
    we.id, we.workout_id, we.exercise_id, we.name, we.sets, we.reps, we.weight,
    we.duration_seconds, we.position, we.created_at, e.muscle_group
"#;

/// Postgres-backed store over the `users`, `exercises`, `workouts` and
/// `workout_exercises` tables.
#[derive(Clone)]
pub struct PgWorkoutStore {
    db: PgPool,
}

impl PgWorkoutStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn entries_for_workouts(
        &self,
        workout_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<ExerciseEntry>>, StoreError> {
        let query = format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM workout_exercises we
            LEFT JOIN exercises e ON e.id = we.exercise_id
            WHERE we.workout_id = ANY($1)
            ORDER BY we.workout_id, we.position
            "#
        );

        let entries = sqlx::query_as::<_, ExerciseEntry>(&query)
            .bind(workout_ids)
            .fetch_all(&self.db)
            .await?;

        let mut by_workout: HashMap<Uuid, Vec<ExerciseEntry>> = HashMap::new();
        for entry in entries {
            by_workout.entry(entry.workout_id).or_default().push(entry);
        }

        Ok(by_workout)
    }

    async fn with_entries(&self, rows: Vec<WorkoutRow>) -> Result<Vec<WorkoutRecord>, StoreError> {
        let workout_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut entries = self.entries_for_workouts(&workout_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let exercises = entries.remove(&row.id).unwrap_or_default();
                row.into_record(exercises)
            })
            .collect())
    }
}

#[async_trait]
impl WorkoutStore for PgWorkoutStore {
    async fn list_completed_workouts(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<WorkoutRecord>, StoreError> {
        let query = format!(
            r#"
            SELECT {WORKOUT_COLUMNS}
            FROM workouts
            WHERE user_id = $1
              AND ended_at IS NOT NULL
              AND ($2::timestamptz IS NULL OR started_at >= $2)
            ORDER BY started_at DESC
            "#
        );

        let rows = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(user_id)
            .bind(since)
            .fetch_all(&self.db)
            .await?;
        debug!("Loaded {} completed workouts for user {}", rows.len(), user_id);

        self.with_entries(rows).await
    }

    async fn list_catalog_exercises(&self) -> Result<Vec<CatalogExercise>, StoreError> {
        let exercises = sqlx::query_as::<_, CatalogExercise>(
            "SELECT id, name, muscle_group, description, video_url FROM exercises ORDER BY name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(exercises)
    }

    async fn last_exercise_entry(
        &self,
        user_id: Uuid,
        name_fragment: &str,
    ) -> Result<Option<ExerciseEntry>, StoreError> {
        // Plain substring match; `%` and `_` in names are literal.
        let query = format!(
            r#"
            SELECT {ENTRY_COLUMNS}
            FROM workout_exercises we
            JOIN workouts w ON w.id = we.workout_id
            LEFT JOIN exercises e ON e.id = we.exercise_id
            WHERE w.user_id = $1
              AND POSITION(LOWER($2) IN LOWER(we.name)) > 0
            ORDER BY we.created_at DESC
            LIMIT 1
            "#
        );

        let entry = sqlx::query_as::<_, ExerciseEntry>(&query)
            .bind(user_id)
            .bind(name_fragment)
            .fetch_optional(&self.db)
            .await?;

        Ok(entry)
    }

    async fn latest_weighted_entries(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ExerciseEntry>, StoreError> {
        let query = format!(
            r#"
            SELECT * FROM (
                SELECT DISTINCT ON (we.name) {ENTRY_COLUMNS}
                FROM workout_exercises we
                JOIN workouts w ON w.id = we.workout_id
                LEFT JOIN exercises e ON e.id = we.exercise_id
                WHERE w.user_id = $1 AND we.weight IS NOT NULL
                ORDER BY we.name, we.created_at DESC
            ) latest
            ORDER BY created_at DESC
            LIMIT $2
            "#
        );

        let entries = sqlx::query_as::<_, ExerciseEntry>(&query)
            .bind(user_id)
            .bind(limit as i64)
            .fetch_all(&self.db)
            .await?;

        Ok(entries)
    }

    async fn get_user_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query_as::<_, UserProfileRow>(&query)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(UserProfile::from))
    }

    async fn update_user_profile(&self, profile: &UserProfile) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2,
                height_cm = $3,
                weight_kg = $4,
                gender = $5,
                date_of_birth = $6,
                fitness_goal = $7,
                activity_level = $8,
                profile_image_url = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(profile.user_id)
        .bind(&profile.name)
        .bind(profile.height_cm)
        .bind(profile.weight_kg)
        .bind(profile.gender.map(|gender| gender.as_str()))
        .bind(profile.date_of_birth)
        .bind(profile.fitness_goal.map(|goal| goal.as_str()))
        .bind(profile.activity_level.map(|level| level.as_str()))
        .bind(&profile.profile_image_url)
        .bind(profile.updated_at)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_catalog_exercise(
        &self,
        exercise_id: Uuid,
    ) -> Result<Option<CatalogExercise>, StoreError> {
        let exercise = sqlx::query_as::<_, CatalogExercise>(
            "SELECT id, name, muscle_group, description, video_url FROM exercises WHERE id = $1",
        )
        .bind(exercise_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(exercise)
    }

    async fn list_workouts(&self, user_id: Uuid) -> Result<Vec<WorkoutRecord>, StoreError> {
        let query = format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE user_id = $1 ORDER BY started_at DESC"
        );

        let rows = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(user_id)
            .fetch_all(&self.db)
            .await?;

        self.with_entries(rows).await
    }

    async fn get_workout(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
    ) -> Result<Option<WorkoutRecord>, StoreError> {
        let query = format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = $1 AND user_id = $2");

        let row = sqlx::query_as::<_, WorkoutRow>(&query)
            .bind(workout_id)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

        match row {
            Some(row) => Ok(self.with_entries(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn insert_workout(&self, workout: &WorkoutRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO workouts (id, user_id, name, started_at, ended_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(workout.id)
        .bind(workout.user_id)
        .bind(&workout.name)
        .bind(workout.started_at)
        .bind(workout.ended_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn end_workout(
        &self,
        user_id: Uuid,
        workout_id: Uuid,
        ended_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE workouts
            SET ended_at = $3
            WHERE id = $1 AND user_id = $2 AND ended_at IS NULL
            "#,
        )
        .bind(workout_id)
        .bind(user_id)
        .bind(ended_at)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_exercise_entry(&self, entry: &ExerciseEntry) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO workout_exercises
                (id, workout_id, exercise_id, name, sets, reps, weight, duration_seconds,
                 position, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(entry.id)
        .bind(entry.workout_id)
        .bind(entry.exercise_id)
        .bind(&entry.name)
        .bind(entry.sets)
        .bind(entry.reps)
        .bind(entry.weight)
        .bind(entry.duration_seconds)
        .bind(entry.position)
        .bind(entry.created_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn delete_workout(&self, user_id: Uuid, workout_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(workout_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
