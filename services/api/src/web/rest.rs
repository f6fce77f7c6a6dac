//! services/api/src/web/rest.rs
//!
//! The master definition for the OpenAPI specification.

use utoipa::OpenApi;

use crate::web::auth::{AuthResponse, AuthUser, LoginRequest, SignupRequest};
use crate::web::ai::{ChatRequest, GenerateQuizRequest};
use crate::web::MessageResponse;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::study_plans::list_study_plans_handler,
        crate::web::study_plans::create_study_plan_handler,
        crate::web::study_plans::update_study_plan_handler,
        crate::web::study_plans::delete_study_plan_handler,
        crate::web::study_plans::dashboard_handler,
        crate::web::auth::signup_handler,
        crate::web::auth::login_handler,
        crate::web::ai::chat_handler,
        crate::web::ai::generate_quiz_handler,
    ),
    components(
        schemas(MessageResponse, SignupRequest, LoginRequest, AuthUser, AuthResponse, ChatRequest, GenerateQuizRequest)
    ),
    tags(
        (name = "Study Assistant API", description = "API endpoints for study plans, the AI tutor, and quiz generation.")
    )
)]
pub struct ApiDoc;
