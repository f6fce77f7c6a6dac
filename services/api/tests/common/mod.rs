//! Shared test harness: the real router over the in-memory database adapter
//! and canned AI adapters, driven without a running server.

use api_lib::adapters::in_memory::InMemoryDb;
use api_lib::config::Config;
use api_lib::web::{self, state::AppState};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use study_assistant_core::domain::{Quiz, QuizQuestion};
use study_assistant_core::ports::{PortResult, QuizGenerationService, TutorService};
use tower::ServiceExt;

pub struct CannedTutor;

#[async_trait]
impl TutorService for CannedTutor {
    async fn answer(&self, message: &str) -> PortResult<String> {
        Ok(format!("You asked: {}", message))
    }
}

pub struct CannedQuizzes;

#[async_trait]
impl QuizGenerationService for CannedQuizzes {
    async fn generate_quiz(
        &self,
        _content: &str,
        subject: &str,
        difficulty: &str,
        question_count: u32,
    ) -> PortResult<Quiz> {
        Ok(Quiz {
            subject: subject.to_string(),
            difficulty: difficulty.to_string(),
            source_content: None,
            questions: (1..=question_count)
                .map(|i| QuizQuestion {
                    id: i,
                    question: format!("Question {}?", i),
                    options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                    correct_answer: 0,
                    explanation: None,
                })
                .collect(),
        })
    }
}

fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().expect("valid test bind address"),
        database_url: String::new(),
        log_level: tracing::Level::INFO,
        openai_api_key: None,
        chat_model: "test-model".to_string(),
        quiz_model: "test-model".to_string(),
    }
}

/// Builds the application router over a fresh in-memory database.
pub fn test_app() -> Router {
    let state = Arc::new(AppState {
        db: Arc::new(InMemoryDb::new()),
        config: Arc::new(test_config()),
        tutor_adapter: Arc::new(CannedTutor),
        quiz_adapter: Arc::new(CannedQuizzes),
    });
    web::router(state)
}

/// Sends one request to the app and returns the status plus parsed JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request builds"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request builds"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router handles the request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body reads")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is JSON")
    };
    (status, json)
}
