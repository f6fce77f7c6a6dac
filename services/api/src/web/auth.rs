//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user signup and login.
//!
//! Login hands the client a stable user identifier; the study-plan endpoints
//! then trust whatever identifier the caller presents. There is no server-side
//! session here.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use study_assistant_core::ports::PortError;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::state::AppState;
use crate::web::{error_response, port_error_response, ErrorResponse};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub user_type: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub user_type: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub user: AuthUser,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/signup - Create a new user account
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created successfully", body = AuthResponse),
        (status = 400, description = "Missing fields or email already taken"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ErrorResponse> {
    let name = req
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Name is required"))?;
    let email = req
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Email is required"))?;
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Password is required"))?;

    // 1. Hash the password
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to hash password")
        })?
        .to_string();

    // 2. Create user in database (duplicate emails come back as a 400)
    let user = state
        .db
        .create_user(&name, &email, &password_hash, req.user_type.as_deref())
        .await
        .map_err(port_error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            user: AuthUser {
                id: user.id,
                name: user.name,
                email: user.email,
                user_type: user.user_type,
            },
        }),
    ))
}

/// POST /auth/login - Login with existing account
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ErrorResponse> {
    let email = req
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Email is required"))?;
    let password = req
        .password
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Password is required"))?;

    // 1. Get user by email. A missing user and a bad password produce the
    //    same response, so the endpoint doesn't reveal which emails exist.
    let user_creds = state.db.get_user_by_email(&email).await.map_err(|e| match e {
        PortError::NotFound(_) => {
            error_response(StatusCode::UNAUTHORIZED, "Invalid email or password")
        }
        other => port_error_response(other),
    })?;

    // 2. Verify password
    let parsed_hash = PasswordHash::new(&user_creds.hashed_password).map_err(|e| {
        error!("Failed to parse password hash: {:?}", e);
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Authentication error")
    })?;

    let valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    if !valid {
        return Err(error_response(
            StatusCode::UNAUTHORIZED,
            "Invalid email or password",
        ));
    }

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user: AuthUser {
            id: user_creds.id,
            name: user_creds.name,
            email: user_creds.email,
            user_type: user_creds.user_type,
        },
    }))
}
