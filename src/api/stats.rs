use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;

use super::{internal_error, ApiError, ApiResult, AppState};
use crate::auth::UserSession;
use crate::models::{ProgressStats, ProgressStatsQuery};

/// Weekly and per-muscle-group volume, `from`/`to` as RFC 3339 timestamps
pub async fn get_progress_stats(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Query(query): Query<ProgressStatsQuery>,
) -> ApiResult<ProgressStats> {
    if let (Some(from), Some(to)) = (query.from, query.to) {
        if from > to {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(
                    ApiError::new("INVALID_RANGE", "'from' must not be after 'to'").with_details(
                        serde_json::json!({ "from": from.to_rfc3339(), "to": to.to_rfc3339() }),
                    ),
                ),
            ));
        }
    }

    let stats = state
        .progress_stats_service
        .compute_progress_stats(session.user_id, &query, Utc::now())
        .await
        .map_err(internal_error("DATABASE_ERROR", "Failed to compute progress stats"))?;

    Ok(Json(stats))
}
