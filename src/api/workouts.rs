use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use super::{ApiError, ApiResult, AppState};
use crate::auth::UserSession;
use crate::models::{AddExerciseRequest, StartWorkoutRequest, WorkoutResponse, MAX_NAME_LENGTH};
use crate::services::WorkoutError;

type ErrorResponse = (StatusCode, Json<ApiError>);

fn workout_error(err: WorkoutError) -> ErrorResponse {
    match err {
        WorkoutError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ApiError::new("WORKOUT_NOT_FOUND", "Workout not found")),
        ),
        WorkoutError::AlreadyEnded => (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("WORKOUT_ALREADY_ENDED", "Workout has already ended")),
        ),
        WorkoutError::UnknownExercise(exercise_id) => (
            StatusCode::BAD_REQUEST,
            Json(
                ApiError::new("EXERCISE_NOT_FOUND", "Exercise is not in the catalog")
                    .with_details(serde_json::json!({ "exercise_id": exercise_id })),
            ),
        ),
        WorkoutError::Store(err) => {
            tracing::error!("Workout storage failure: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("DATABASE_ERROR", "Failed to access workouts")),
            )
        }
    }
}

pub async fn list_workouts(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> ApiResult<Vec<WorkoutResponse>> {
    let workouts = state
        .workout_service
        .list_workouts(session.user_id)
        .await
        .map_err(workout_error)?;

    Ok(Json(workouts.into_iter().map(WorkoutResponse::from).collect()))
}

pub async fn get_workout(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(workout_id): Path<Uuid>,
) -> ApiResult<WorkoutResponse> {
    let workout = state
        .workout_service
        .get_workout(session.user_id, workout_id)
        .await
        .map_err(workout_error)?;

    Ok(Json(workout.into()))
}

/// The body is optional; without one the workout gets the default name.
pub async fn start_workout(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    payload: Option<Json<StartWorkoutRequest>>,
) -> Result<(StatusCode, Json<WorkoutResponse>), ErrorResponse> {
    let request = payload.map(|Json(request)| request).unwrap_or_default();

    let workout = state
        .workout_service
        .start_workout(session.user_id, &request)
        .await
        .map_err(workout_error)?;

    Ok((StatusCode::CREATED, Json(workout.into())))
}

pub async fn end_workout(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(workout_id): Path<Uuid>,
) -> ApiResult<WorkoutResponse> {
    let workout = state
        .workout_service
        .end_workout(session.user_id, workout_id)
        .await
        .map_err(workout_error)?;

    Ok(Json(workout.into()))
}

pub async fn add_exercise(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(workout_id): Path<Uuid>,
    Json(request): Json<AddExerciseRequest>,
) -> ApiResult<WorkoutResponse> {
    let name_length = request.name.trim().chars().count();
    if name_length == 0 || name_length > MAX_NAME_LENGTH {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(
                "INVALID_NAME",
                "Exercise name must be between 1 and 100 characters",
            )),
        ));
    }

    let workout = state
        .workout_service
        .add_exercise(session.user_id, workout_id, request)
        .await
        .map_err(workout_error)?;

    Ok(Json(workout.into()))
}

pub async fn delete_workout(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Path(workout_id): Path<Uuid>,
) -> Result<StatusCode, ErrorResponse> {
    state
        .workout_service
        .delete_workout(session.user_id, workout_id)
        .await
        .map_err(workout_error)?;

    Ok(StatusCode::NO_CONTENT)
}
