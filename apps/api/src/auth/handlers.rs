//! Axum route handlers for sign-up, sign-in, and the current session.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::jwt::issue_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::session::{check_sign_in, Session};
use crate::errors::AppError;
use crate::models::user::{Role, UserRow};
use crate::state::AppState;
use crate::users::store::{self, NewUser};

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserRow,
}

/// Validates and inserts an account. Shared by self sign-up and admin creation.
/// Admin accounts are never created through the API.
pub async fn create_account(state: &AppState, req: &SignUpRequest) -> Result<UserRow, AppError> {
    if req.role == Role::Admin {
        return Err(AppError::Validation(
            "role must be student or counselor".to_string(),
        ));
    }

    let required = [
        ("email", &req.email),
        ("first_name", &req.first_name),
        ("last_name", &req.last_name),
    ];
    if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    if !req.email.contains('@') {
        return Err(AppError::Validation("email is not valid".to_string()));
    }
    validate_password_strength(&req.password, state.config.min_password_length)
        .map_err(AppError::Validation)?;

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))?;

    let user = store::insert_user(
        &state.db,
        NewUser {
            email: &req.email,
            password_hash: &password_hash,
            role: req.role,
            first_name: &req.first_name,
            last_name: &req.last_name,
        },
    )
    .await?
    .ok_or_else(|| AppError::Conflict(format!("An account for {} already exists", req.email)))?;

    info!(user_id = %user.id, role = %req.role, "account created");
    Ok(user)
}

fn session_token(state: &AppState, user: &UserRow) -> Result<String, AppError> {
    issue_token(user.id, user.role(), &state.jwt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("token signing failed: {e}")))
}

/// POST /api/v1/auth/signup
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let user = create_account(&state, &req).await?;
    let token = session_token(&state, &user)?;
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

/// POST /api/v1/auth/signin
///
/// Credentials first, then the requested role, then restriction.
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let user = store::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(invalid)?;

    let verified = verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("stored hash unreadable: {e}")))?;
    check_sign_in(&user, req.role, verified)?;

    let token = session_token(&state, &user)?;
    info!(user_id = %user.id, role = %user.role, "signed in");
    Ok(Json(AuthResponse { token, user }))
}

/// GET /api/v1/auth/me
pub async fn handle_me(session: Session) -> Json<UserRow> {
    Json(session.user)
}
