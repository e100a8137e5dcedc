use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{internal_error, ApiError, ApiResult, AppState};
use crate::models::CatalogExercise;

#[derive(Debug, Deserialize)]
pub struct ExerciseQuery {
    pub muscle_group: Option<String>,
}

pub async fn list_exercises(
    State(state): State<AppState>,
    Query(query): Query<ExerciseQuery>,
) -> ApiResult<Vec<CatalogExercise>> {
    let exercises = state
        .exercise_catalog_service
        .list_exercises(query.muscle_group.as_deref())
        .await
        .map_err(internal_error("DATABASE_ERROR", "Failed to list exercises"))?;

    Ok(Json(exercises))
}

pub async fn get_exercise(
    State(state): State<AppState>,
    Path(exercise_id): Path<Uuid>,
) -> ApiResult<CatalogExercise> {
    let exercise = state
        .exercise_catalog_service
        .get_exercise(exercise_id)
        .await
        .map_err(internal_error("DATABASE_ERROR", "Failed to load exercise"))?;

    exercise.map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::new("EXERCISE_NOT_FOUND", "Exercise not found")),
        )
    })
}

pub async fn list_muscle_groups(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let groups = state
        .exercise_catalog_service
        .list_muscle_groups()
        .await
        .map_err(internal_error("DATABASE_ERROR", "Failed to list muscle groups"))?;

    Ok(Json(groups))
}
