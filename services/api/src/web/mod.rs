//! services/api/src/web/mod.rs
//!
//! The HTTP surface: handlers, shared state, router assembly, and the JSON
//! error envelope every endpoint failure is converted into.

pub mod ai;
pub mod auth;
pub mod rest;
pub mod state;
pub mod study_plans;

pub use study_plans::{
    create_study_plan_handler, dashboard_handler, delete_study_plan_handler,
    list_study_plans_handler, update_study_plan_handler,
};

use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use study_assistant_core::ports::PortError;
use tracing::error;
use utoipa::ToSchema;

use crate::web::state::AppState;

/// The `{"message": ...}` body every error (and a few confirmations) uses.
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// The error half of every handler's return type.
pub type ErrorResponse = (StatusCode, Json<MessageResponse>);

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (
        status,
        Json(MessageResponse {
            message: message.into(),
        }),
    )
}

/// Maps a port failure onto the HTTP contract: Validation -> 400,
/// NotFound -> 404, Unauthorized -> 401, anything unexpected -> 500 with the
/// detail kept in the log rather than the response.
pub(crate) fn port_error_response(err: PortError) -> ErrorResponse {
    match err {
        PortError::Validation(message) => error_response(StatusCode::BAD_REQUEST, message),
        PortError::NotFound(message) => error_response(StatusCode::NOT_FOUND, message),
        PortError::Unauthorized => {
            error_response(StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
        }
        PortError::Unexpected(detail) => {
            error!("Unexpected port error: {}", detail);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// Builds the application router over the shared state. The binary wraps this
/// with CORS and the Swagger UI; tests drive it directly with `oneshot`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/login", post(auth::login_handler))
        .route(
            "/study-plans",
            get(study_plans::list_study_plans_handler)
                .post(study_plans::create_study_plan_handler)
                .put(study_plans::update_study_plan_handler)
                .delete(study_plans::delete_study_plan_handler),
        )
        .route("/study-plans/dashboard", get(study_plans::dashboard_handler))
        .route("/chat", post(ai::chat_handler))
        .route("/generate-quiz", post(ai::generate_quiz_handler))
        .with_state(state)
}
