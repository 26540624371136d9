//! Axum route handlers for job post submission and review.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::{RequireAdmin, RequireCounselor};
use crate::errors::AppError;
use crate::feed::FeedEvent;
use crate::models::job_post::{JobPostRow, PostStatus};
use crate::posts::review::{check_editable, check_reviewable, RejectRequest, ReviewDecision};
use crate::posts::store;
use crate::posts::validation::{validate_draft, PostDraft};
use crate::skills::upsert_skills;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AdminPostListResponse {
    pub posts: Vec<JobPostRow>,
    pub pending: usize,
}

async fn load_post(state: &AppState, post_id: Uuid) -> Result<JobPostRow, AppError> {
    store::find_by_id(&state.db, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job post {post_id} not found")))
}

/// POST /api/v1/posts
///
/// Submits a new posting for admin review.
pub async fn handle_submit_post(
    State(state): State<AppState>,
    RequireCounselor(session): RequireCounselor,
    Json(draft): Json<PostDraft>,
) -> Result<(StatusCode, Json<JobPostRow>), AppError> {
    let draft = validate_draft(draft)?;

    let post = store::insert_post(&state.db, &session.user, &draft).await?;
    upsert_skills(&state.db, &post.required_skills, session.user_id()).await?;

    info!(post_id = %post.id, counselor_id = %session.user_id(), "job post submitted");
    state.feed.publish(FeedEvent::PostSubmitted { post_id: post.id });

    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/v1/posts/:id
///
/// Edits a posting that is still awaiting review.
pub async fn handle_update_post(
    State(state): State<AppState>,
    RequireCounselor(session): RequireCounselor,
    Path(post_id): Path<Uuid>,
    Json(draft): Json<PostDraft>,
) -> Result<Json<JobPostRow>, AppError> {
    let existing = load_post(&state, post_id).await?;
    check_editable(&existing, session.user_id())?;
    let draft = validate_draft(draft)?;

    // Catalog only what was actually stored; a lost race leaves it untouched.
    let post = store::update_pending_post(&state.db, post_id, &draft)
        .await?
        .ok_or_else(|| {
            AppError::Conflict(format!("Job post {post_id} was reviewed before the edit"))
        })?;
    upsert_skills(&state.db, &post.required_skills, session.user_id()).await?;

    info!(post_id = %post.id, "job post updated");
    state.feed.publish(FeedEvent::PostUpdated { post_id: post.id });

    Ok(Json(post))
}

/// GET /api/v1/posts/mine
pub async fn handle_my_posts(
    State(state): State<AppState>,
    RequireCounselor(session): RequireCounselor,
) -> Result<Json<Vec<JobPostRow>>, AppError> {
    let posts = store::list_by_counselor(&state.db, session.user_id()).await?;
    Ok(Json(posts))
}

/// GET /api/v1/admin/posts
pub async fn handle_admin_posts(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<AdminPostListResponse>, AppError> {
    let posts = store::list_all(&state.db).await?;
    let pending = posts
        .iter()
        .filter(|p| p.status() == PostStatus::Pending)
        .count();
    Ok(Json(AdminPostListResponse { posts, pending }))
}

/// POST /api/v1/admin/posts/:id/approve
pub async fn handle_approve_post(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(post_id): Path<Uuid>,
) -> Result<Json<JobPostRow>, AppError> {
    review(&state, admin.user_id(), post_id, ReviewDecision::Approve).await
}

/// POST /api/v1/admin/posts/:id/reject
pub async fn handle_reject_post(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(post_id): Path<Uuid>,
    Json(req): Json<RejectRequest>,
) -> Result<Json<JobPostRow>, AppError> {
    let decision = ReviewDecision::reject(&req.reason)?;
    review(&state, admin.user_id(), post_id, decision).await
}

async fn review(
    state: &AppState,
    reviewer_id: Uuid,
    post_id: Uuid,
    decision: ReviewDecision,
) -> Result<Json<JobPostRow>, AppError> {
    let existing = load_post(state, post_id).await?;
    check_reviewable(&existing)?;

    let post = store::apply_review(&state.db, post_id, reviewer_id, &decision)
        .await?
        .ok_or_else(|| AppError::Conflict(format!("Job post {post_id} was already reviewed")))?;

    info!(
        post_id = %post.id,
        reviewer_id = %reviewer_id,
        status = %post.status,
        "job post reviewed"
    );
    let event = match decision {
        ReviewDecision::Approve => FeedEvent::PostApproved { post_id },
        ReviewDecision::Reject { .. } => FeedEvent::PostRejected { post_id },
    };
    state.feed.publish(event);

    Ok(Json(post))
}
