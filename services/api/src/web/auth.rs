//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user signup, login, and logout. These are
//! thin callers of the `SessionStore`: they orchestrate which store method to
//! run and translate its result into a response, nothing more.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use bookdash_core::ports::StoreError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub username: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub email: String,
    pub logged_in: bool,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/signup - Create a new user account and log it in
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created and logged in", body = AuthResponse),
        (status = 409, description = "A user with this email already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .session
        .register(&req.email, &req.password, req.username.as_deref())
        .await
        .map_err(|e| match e {
            StoreError::DuplicateUser => (StatusCode::CONFLICT, e.to_string()),
            other => {
                error!("Failed to register user: {:?}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to register user".to_string(),
                )
            }
        })?;

    let response = AuthResponse {
        email: req.email,
        logged_in: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
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
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .session
        .authenticate(&req.email, &req.password)
        .await
        .map_err(|e| match e {
            StoreError::InvalidCredentials => (StatusCode::UNAUTHORIZED, e.to_string()),
            other => {
                error!("Failed to log in: {:?}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to log in".to_string(),
                )
            }
        })?;

    let response = AuthResponse {
        email: req.email,
        logged_in: true,
    };
    Ok((StatusCode::OK, Json(response)))
}

/// POST /auth/logout - Clear the session token
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logout successful")
    )
)]
pub async fn logout_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.session.terminate();
    StatusCode::OK
}
