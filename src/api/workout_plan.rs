use axum::{
    extract::{Extension, State},
    response::Json,
};
use tracing::info;

use super::{internal_error, ApiResult, AppState};
use crate::auth::UserSession;
use crate::models::{GeneratePlanRequest, PerformanceAnalysis, PlanPreset, WeeklyPlan};

/// Generate a weekly plan for the authenticated user
pub async fn generate_plan(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<GeneratePlanRequest>,
) -> ApiResult<WeeklyPlan> {
    let plan = state
        .plan_generation_service
        .generate_weekly_plan(session.user_id, &request)
        .await
        .map_err(internal_error("GENERATION_ERROR", "Failed to generate plan"))?;

    info!(
        "Generated plan '{}' with {} days for user {}",
        plan.plan_name, plan.total_days, session.user_id
    );
    Ok(Json(plan))
}

/// Analyse the last 30 days of training
pub async fn analyze_performance(
    State(state): State<AppState>,
    Extension(session): Extension<UserSession>,
) -> ApiResult<PerformanceAnalysis> {
    let analysis = state
        .performance_analysis_service
        .analyze_performance(session.user_id)
        .await
        .map_err(internal_error("ANALYSIS_ERROR", "Failed to analyze performance"))?;

    Ok(Json(analysis))
}

pub async fn list_plan_templates(State(state): State<AppState>) -> ApiResult<&'static [PlanPreset]> {
    Ok(Json(state.plan_generation_service.plan_presets()))
}
