// API routes and handlers

pub mod exercises;
pub mod health;
pub mod profile;
pub mod routes;
pub mod stats;
pub mod workout_plan;
pub mod workouts;

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

pub use routes::{create_routes, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error_code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            error_code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// Logs a service failure and turns it into a 500 response.
pub(crate) fn internal_error(
    code: &'static str,
    message: &'static str,
) -> impl FnOnce(anyhow::Error) -> (StatusCode, Json<ApiError>) {
    move |err| {
        tracing::error!("{}: {:#}", message, err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new(code, message)),
        )
    }
}
