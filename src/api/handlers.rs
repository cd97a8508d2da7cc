//! HTTP request handlers

use super::types::{ErrorResponse, HealthResponse, VersionResponse};
use super::AppState;
use crate::platform::{PlatformError, RequestEnvelope, ResponseEnvelope};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Voice platform webhook
        .route("/skill", post(handle_skill))
        .route("/health", get(health))
        .route("/version", get(get_version))
        .with_state(state)
}

async fn handle_skill(
    State(state): State<AppState>,
    Json(envelope): Json<RequestEnvelope>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    state.skill.handle(&envelope).map(Json).map_err(AppError::from)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let context = state.skill.engine().context();
    Json(HealthResponse {
        ok: true,
        vocabulary_size: context.pool.len(),
        min_count: context.min_count,
        max_count: context.max_count,
    })
}

async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Internal(String),
}

impl From<PlatformError> for AppError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::InvalidApplicationId(_) | PlatformError::MissingApplicationId => {
                AppError::BadRequest(err.to_string())
            }
            PlatformError::Dialog(_) => {
                tracing::error!(error = %err, "Skill request failed");
                AppError::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
