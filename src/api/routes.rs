use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::exercises::{get_exercise, list_exercises, list_muscle_groups};
use super::health::health_check;
use super::profile::{
    get_health_metrics, get_profile, get_profile_stats, log_weight, update_profile,
};
use super::stats::get_progress_stats;
use super::workout_plan::{analyze_performance, generate_plan, list_plan_templates};
use super::workouts::{
    add_exercise, delete_workout, end_workout, get_workout, list_workouts, start_workout,
};
use crate::auth::{cors_layer, jwt_auth_middleware, security_headers_layer, JwtService};
use crate::services::{
    ExerciseCatalogService, PerformanceAnalysisService, PlanGenerationService, ProfileService,
    ProgressStatsService, WorkoutService,
};
use crate::storage::WorkoutStore;

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub plan_generation_service: PlanGenerationService,
    pub performance_analysis_service: PerformanceAnalysisService,
    pub profile_service: ProfileService,
    pub progress_stats_service: ProgressStatsService,
    pub exercise_catalog_service: ExerciseCatalogService,
    pub workout_service: WorkoutService,
}

impl AppState {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self {
            plan_generation_service: PlanGenerationService::new(store.clone()),
            performance_analysis_service: PerformanceAnalysisService::new(store.clone()),
            profile_service: ProfileService::new(store.clone()),
            progress_stats_service: ProgressStatsService::new(store.clone()),
            exercise_catalog_service: ExerciseCatalogService::new(store.clone()),
            workout_service: WorkoutService::new(store),
        }
    }
}

pub fn create_routes(store: Arc<dyn WorkoutStore>, jwt_service: JwtService) -> Router {
    let state = AppState::new(store);

    let api_routes = Router::new()
        .route("/workout-plan/generate", post(generate_plan))
        .route("/workout-plan/analysis", get(analyze_performance))
        .route("/workout-plan/templates", get(list_plan_templates))
        .route("/workouts", get(list_workouts).post(start_workout))
        .route("/workouts/:id", get(get_workout).delete(delete_workout))
        .route("/workouts/:id/end", patch(end_workout))
        .route("/workouts/:id/exercises", post(add_exercise))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/profile/log-weight", post(log_weight))
        .route("/profile/health-metrics", get(get_health_metrics))
        .route("/profile/stats", get(get_profile_stats))
        .route("/stats/progress", get(get_progress_stats))
        .route("/exercises", get(list_exercises))
        .route("/exercises/muscle-groups", get(list_muscle_groups))
        .route("/exercises/:id", get(get_exercise))
        .route_layer(middleware::from_fn_with_state(
            jwt_service,
            jwt_auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(security_headers_layer())
        .layer(cors_layer())
}
