//! crates/study_assistant_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewStudyPlan, Quiz, StudyPlan, StudyPlanPatch, User, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The operation targeted a record that does not exist. Surfaced as 404.
    #[error("Item not found: {0}")]
    NotFound(String),
    /// A required identifier or field was missing or malformed. Surfaced as 400.
    #[error("{0}")]
    Validation(String),
    #[error("Unauthorized")]
    Unauthorized,
    /// The store or an upstream service failed. Surfaced as 500, never retried.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- User Management ---
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        hashed_password: &str,
        user_type: Option<&str>,
    ) -> PortResult<User>;

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    // --- Study Plan Management ---
    //
    // The repository owns id generation and timestamping: `create_study_plan`
    // assigns a fresh id plus `createdAt`, and `update_study_plan` performs
    // the one mutation primitive there is - a shallow merge of the patch into
    // the stored record, persisted as a whole document in a single atomic
    // write. Task add/edit/delete/status-change are all expressed by the
    // caller as a patch carrying the full rewritten `tasks` list.

    /// Returns every plan owned by `user_id`, in store-native order.
    /// Unknown owners get an empty list, not an error.
    async fn list_study_plans_by_user(&self, user_id: Uuid) -> PortResult<Vec<StudyPlan>>;

    async fn create_study_plan(&self, fields: NewStudyPlan) -> PortResult<StudyPlan>;

    async fn update_study_plan(&self, id: Uuid, patch: StudyPlanPatch) -> PortResult<StudyPlan>;

    async fn delete_study_plan(&self, id: Uuid) -> PortResult<()>;
}

#[async_trait]
pub trait TutorService: Send + Sync {
    /// Answers a student's free-form question.
    async fn answer(&self, message: &str) -> PortResult<String>;
}

#[async_trait]
pub trait QuizGenerationService: Send + Sync {
    /// Generates a multiple-choice quiz over the supplied study material.
    async fn generate_quiz(
        &self,
        content: &str,
        subject: &str,
        difficulty: &str,
        question_count: u32,
    ) -> PortResult<Quiz>;
}
