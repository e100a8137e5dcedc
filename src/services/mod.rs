// Business logic services

pub mod exercise_catalog_service;
pub mod metrics;
pub mod performance_analysis_service;
pub mod plan_generation_service;
pub mod profile_service;
pub mod progress_stats_service;
pub mod templates;
pub mod workout_service;

pub use exercise_catalog_service::ExerciseCatalogService;
pub use performance_analysis_service::PerformanceAnalysisService;
pub use plan_generation_service::PlanGenerationService;
pub use profile_service::ProfileService;
pub use progress_stats_service::ProgressStatsService;
pub use workout_service::{WorkoutError, WorkoutService};
