use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use rust_decimal::Decimal;

use super::{internal_error, ApiError, ApiResult, AppState};
use crate::auth::UserSession;
use crate::models::{
    HealthMetrics, LoggedWeight, ProfileOverview, ProfileStats, UpdateProfileRequest,
    HEIGHT_RANGE_CM, MAX_NAME_LENGTH, WEIGHT_RANGE_KG,
};

fn user_not_found() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new("USER_NOT_FOUND", "User not found")),
    )
}

fn invalid_weight() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::new("INVALID_WEIGHT", "Weight must be between 20 and 500 kg")),
    )
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> ApiResult<ProfileOverview> {
    let profile = state
        .profile_service
        .get_profile(session.user_id)
        .await
        .map_err(internal_error("DATABASE_ERROR", "Failed to load profile"))?;

    profile.map(Json).ok_or_else(user_not_found)
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<UpdateProfileRequest>,
) -> ApiResult<ProfileOverview> {
    if request
        .name
        .as_ref()
        .is_some_and(|name| name.chars().count() > MAX_NAME_LENGTH)
    {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("INVALID_NAME", "Name must be at most 100 characters")),
        ));
    }

    if let Some(height) = request.height_cm {
        if !HEIGHT_RANGE_CM.contains(&height) {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiError::new("INVALID_HEIGHT", "Height must be between 50 and 300 cm")),
            ));
        }
    }

    if let Some(weight) = request.weight_kg {
        if !WEIGHT_RANGE_KG.contains(&weight) {
            return Err(invalid_weight());
        }
    }

    let profile = state
        .profile_service
        .update_profile(session.user_id, request, Utc::now())
        .await
        .map_err(internal_error("DATABASE_ERROR", "Failed to update profile"))?;

    profile.map(Json).ok_or_else(user_not_found)
}

/// The body is a bare number, e.g. `72.5`.
pub async fn log_weight(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(weight): Json<Decimal>,
) -> ApiResult<LoggedWeight> {
    if !WEIGHT_RANGE_KG.contains(&weight) {
        return Err(invalid_weight());
    }

    let logged = state
        .profile_service
        .log_weight(session.user_id, weight, Utc::now())
        .await
        .map_err(internal_error("DATABASE_ERROR", "Failed to log weight"))?;

    logged.map(Json).ok_or_else(user_not_found)
}

pub async fn get_health_metrics(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> ApiResult<HealthMetrics> {
    let metrics = state
        .profile_service
        .compute_health_metrics(session.user_id, Utc::now())
        .await
        .map_err(internal_error("DATABASE_ERROR", "Failed to compute health metrics"))?;

    metrics.map(Json).ok_or_else(user_not_found)
}

pub async fn get_profile_stats(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> ApiResult<ProfileStats> {
    let stats = state
        .profile_service
        .compute_profile_stats(session.user_id)
        .await
        .map_err(internal_error("DATABASE_ERROR", "Failed to compute profile stats"))?;

    Ok(Json(stats))
}
