//! services/api/src/web/ai.rs
//!
//! Axum handlers proxying the AI collaborators: the chat tutor and the quiz
//! generator. Both just validate the payload and delegate to their port.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use std::sync::Arc;
use study_assistant_core::domain::Quiz;
use utoipa::ToSchema;

use crate::web::state::AppState;
use crate::web::{error_response, port_error_response, ErrorResponse, MessageResponse};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: Option<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    pub content: Option<String>,
    pub subject: Option<String>,
    pub difficulty: Option<String>,
    pub question_count: Option<String>,
}

/// Maps the UI's question-count names onto actual counts.
fn question_count_for(name: Option<&str>) -> u32 {
    match name {
        Some("minimum") => 5,
        Some("maximum") => 15,
        _ => 10,
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /chat - Ask the AI tutor a question
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "The tutor's answer", body = MessageResponse),
        (status = 400, description = "No message provided", body = MessageResponse),
        (status = 500, description = "Upstream model failure", body = MessageResponse)
    )
)]
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<MessageResponse>, ErrorResponse> {
    let message = req
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "No message provided"))?;

    let answer = state
        .tutor_adapter
        .answer(&message)
        .await
        .map_err(port_error_response)?;

    Ok(Json(MessageResponse { message: answer }))
}

/// POST /generate-quiz - Generate a quiz from study material
#[utoipa::path(
    post,
    path = "/generate-quiz",
    request_body = GenerateQuizRequest,
    responses(
        (status = 200, description = "The generated quiz"),
        (status = 400, description = "Missing parameters", body = MessageResponse),
        (status = 500, description = "Upstream model failure", body = MessageResponse)
    )
)]
pub async fn generate_quiz_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateQuizRequest>,
) -> Result<Json<Quiz>, ErrorResponse> {
    let (content, subject, difficulty) = match (&req.content, &req.subject, &req.difficulty) {
        (Some(content), Some(subject), Some(difficulty))
            if !content.trim().is_empty()
                && !subject.trim().is_empty()
                && !difficulty.trim().is_empty() =>
        {
            (content, subject, difficulty)
        }
        _ => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "Missing required parameters: content, subject, difficulty, questionCount",
            ))
        }
    };

    let count = question_count_for(req.question_count.as_deref());
    let quiz = state
        .quiz_adapter
        .generate_quiz(content, subject, difficulty, count)
        .await
        .map_err(port_error_response)?;

    Ok(Json(quiz))
}
