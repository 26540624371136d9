//! Review workflow: `pending → approved | rejected`, nothing else.
//!
//! The transition rules are pure so they can be checked before any write;
//! the store applies them with a `status = 'pending'` guard.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::job_post::{JobPostRow, PostStatus};

#[derive(Debug, Clone, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject { reason: String },
}

impl ReviewDecision {
    /// Builds a rejection, requiring a non-blank reason.
    pub fn reject(reason: &str) -> Result<Self, AppError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::Validation(
                "Please provide a reason for rejection".to_string(),
            ));
        }
        Ok(ReviewDecision::Reject {
            reason: reason.to_string(),
        })
    }

    pub fn target_status(&self) -> PostStatus {
        match self {
            ReviewDecision::Approve => PostStatus::Approved,
            ReviewDecision::Reject { .. } => PostStatus::Rejected,
        }
    }
}

/// Only pending postings can be reviewed.
pub fn check_reviewable(post: &JobPostRow) -> Result<(), AppError> {
    match post.status() {
        PostStatus::Pending => Ok(()),
        status => Err(AppError::Conflict(format!(
            "Job post {} is already {status}",
            post.id
        ))),
    }
}

/// Counselors edit their own postings, and only while pending.
pub fn check_editable(post: &JobPostRow, counselor_id: uuid::Uuid) -> Result<(), AppError> {
    if post.counselor_id != counselor_id {
        return Err(AppError::Forbidden(
            "You can only edit your own job posts".to_string(),
        ));
    }
    match post.status() {
        PostStatus::Pending => Ok(()),
        status => Err(AppError::Conflict(format!(
            "Job post {} is {status} and can no longer be edited",
            post.id
        ))),
    }
}
