use axum::{extract::State, Json};

use crate::auth::{RequireAdmin, RequireCounselor};
use crate::dashboard::stats::{count_posts, count_users, AdminDashboard, PostCounts};
use crate::errors::AppError;
use crate::posts::store as post_store;
use crate::state::AppState;
use crate::users::store as user_store;

/// GET /api/v1/admin/dashboard
pub async fn handle_admin_dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<AdminDashboard>, AppError> {
    let users = user_store::list_users(&state.db).await?;
    let posts = post_store::list_all(&state.db).await?;
    Ok(Json(AdminDashboard {
        users: count_users(&users),
        posts: count_posts(&posts),
    }))
}

/// GET /api/v1/counselor/dashboard
pub async fn handle_counselor_dashboard(
    State(state): State<AppState>,
    RequireCounselor(session): RequireCounselor,
) -> Result<Json<PostCounts>, AppError> {
    let posts = post_store::list_by_counselor(&state.db, session.user_id()).await?;
    Ok(Json(count_posts(&posts)))
}
