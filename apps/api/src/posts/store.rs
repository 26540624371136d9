use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::job_post::{JobPostRow, PostStatus};
use crate::models::user::UserRow;
use crate::posts::review::ReviewDecision;
use crate::posts::validation::ValidDraft;

pub async fn find_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<JobPostRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostRow>("SELECT * FROM job_posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_post(
    pool: &PgPool,
    counselor: &UserRow,
    draft: &ValidDraft,
) -> Result<JobPostRow, sqlx::Error> {
    sqlx::query_as::<_, JobPostRow>(
        r#"
        INSERT INTO job_posts
            (id, title, description, company, location, image_url,
             required_skills, counselor_id, counselor_name, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(&draft.company)
    .bind(&draft.location)
    .bind(&draft.image_url)
    .bind(&draft.required_skills)
    .bind(counselor.id)
    .bind(counselor.full_name())
    .bind(PostStatus::Pending.as_str())
    .fetch_one(pool)
    .await
}

/// Rewrites a pending posting in place; `created_at` is untouched.
/// Returns `None` if the posting left `pending` in the meantime.
pub async fn update_pending_post(
    pool: &PgPool,
    post_id: Uuid,
    draft: &ValidDraft,
) -> Result<Option<JobPostRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostRow>(
        r#"
        UPDATE job_posts
        SET title = $2, description = $3, company = $4, location = $5,
            image_url = $6, required_skills = $7, status = 'pending'
        WHERE id = $1 AND status = 'pending'
        RETURNING *
        "#,
    )
    .bind(post_id)
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(&draft.company)
    .bind(&draft.location)
    .bind(&draft.image_url)
    .bind(&draft.required_skills)
    .fetch_optional(pool)
    .await
}

/// Applies a review decision. Returns `None` when the posting was not pending.
pub async fn apply_review(
    pool: &PgPool,
    post_id: Uuid,
    reviewer_id: Uuid,
    decision: &ReviewDecision,
) -> Result<Option<JobPostRow>, sqlx::Error> {
    match decision {
        ReviewDecision::Approve => {
            sqlx::query_as::<_, JobPostRow>(
                r#"
                UPDATE job_posts
                SET status = $2, approved_at = $3, approved_by = $4, rejection_reason = NULL
                WHERE id = $1 AND status = 'pending'
                RETURNING *
                "#,
            )
            .bind(post_id)
            .bind(decision.target_status().as_str())
            .bind(Utc::now())
            .bind(reviewer_id)
            .fetch_optional(pool)
            .await
        }
        ReviewDecision::Reject { reason } => {
            sqlx::query_as::<_, JobPostRow>(
                r#"
                UPDATE job_posts
                SET status = $2, rejection_reason = $3
                WHERE id = $1 AND status = 'pending'
                RETURNING *
                "#,
            )
            .bind(post_id)
            .bind(decision.target_status().as_str())
            .bind(reason)
            .fetch_optional(pool)
            .await
        }
    }
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<JobPostRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostRow>("SELECT * FROM job_posts ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_by_counselor(
    pool: &PgPool,
    counselor_id: Uuid,
) -> Result<Vec<JobPostRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostRow>(
        "SELECT * FROM job_posts WHERE counselor_id = $1 ORDER BY created_at DESC",
    )
    .bind(counselor_id)
    .fetch_all(pool)
    .await
}

/// Approved postings, most recently approved first.
pub async fn list_approved(pool: &PgPool) -> Result<Vec<JobPostRow>, sqlx::Error> {
    sqlx::query_as::<_, JobPostRow>(
        "SELECT * FROM job_posts WHERE status = 'approved' ORDER BY approved_at DESC NULLS LAST",
    )
    .fetch_all(pool)
    .await
}
