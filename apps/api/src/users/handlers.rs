//! Axum route handlers for student profiles and admin user management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::handlers::{create_account, SignUpRequest};
use crate::auth::password::hash_password;
use crate::auth::{RequireAdmin, RequireStudent, Session};
use crate::errors::AppError;
use crate::models::user::{Role, UserRow};
use crate::state::AppState;
use crate::users::account::{validate_account_update, AccountUpdate};
use crate::users::profile::{build_profile, ProfileUpdate};
use crate::users::store;

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserRow>,
    pub total: usize,
    pub restricted: usize,
}

#[derive(Debug, Serialize)]
pub struct RestrictionResponse {
    pub user_id: Uuid,
    pub is_restricted: bool,
}

/// PUT /api/v1/users/me
///
/// Any role edits its own name, email, password, phone and picture URL.
pub async fn handle_update_account(
    State(state): State<AppState>,
    session: Session,
    Json(update): Json<AccountUpdate>,
) -> Result<Json<UserRow>, AppError> {
    let update = validate_account_update(update, state.config.min_password_length)?;

    let password_hash = update
        .new_password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))?;

    let user = store::update_account(
        &state.db,
        session.user_id(),
        &update,
        password_hash.as_deref(),
    )
    .await
    .map_err(|e| {
        if store::is_email_conflict(&e) {
            AppError::Conflict(format!("An account for {} already exists", update.email))
        } else {
            AppError::Database(e)
        }
    })?
    .ok_or_else(|| AppError::NotFound(format!("User {} not found", session.user_id())))?;

    info!(
        user_id = %user.id,
        password_changed = password_hash.is_some(),
        "account settings updated"
    );
    Ok(Json(user))
}

/// PUT /api/v1/students/me/profile
pub async fn handle_save_profile(
    State(state): State<AppState>,
    RequireStudent(session): RequireStudent,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserRow>, AppError> {
    let profile = build_profile(update, Utc::now())?;
    let user = store::save_profile(&state.db, session.user_id(), &profile).await?;
    info!(user_id = %user.id, skills = profile.skills.len(), "student profile saved");
    Ok(Json(user))
}

/// GET /api/v1/admin/users
pub async fn handle_list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<UserListResponse>, AppError> {
    let users = store::list_users(&state.db).await?;
    let restricted = users.iter().filter(|u| u.is_restricted).count();
    Ok(Json(UserListResponse {
        total: users.len(),
        restricted,
        users,
    }))
}

/// POST /api/v1/admin/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<UserRow>), AppError> {
    let user = create_account(&state, &req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub fn check_restrictable(user: &UserRow) -> Result<(), AppError> {
    if user.role() == Role::Admin {
        return Err(AppError::Forbidden(
            "Admin accounts cannot be restricted".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/v1/admin/users/:id/restriction
///
/// Flips the restriction flag. Admin accounts cannot be restricted.
pub async fn handle_toggle_restriction(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<Uuid>,
) -> Result<Json<RestrictionResponse>, AppError> {
    let target = store::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    check_restrictable(&target)?;

    let updated = store::set_restricted(&state.db, user_id, !target.is_restricted)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
    info!(
        user_id = %user_id,
        admin_id = %admin.user_id(),
        is_restricted = updated.is_restricted,
        "user restriction toggled"
    );

    Ok(Json(RestrictionResponse {
        user_id,
        is_restricted: updated.is_restricted,
    }))
}
