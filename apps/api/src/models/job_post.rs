use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Review lifecycle of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Pending,
    Approved,
    Rejected,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Pending => "pending",
            PostStatus::Approved => "approved",
            PostStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PostStatus::Pending),
            "approved" => Ok(PostStatus::Approved),
            "rejected" => Ok(PostStatus::Rejected),
            other => Err(format!("unknown post status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub image_url: String,
    pub required_skills: Vec<String>,
    pub counselor_id: Uuid,
    pub counselor_name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
    pub rejection_reason: Option<String>,
}

impl JobPostRow {
    /// Rows with an unrecognised status are treated as still awaiting review.
    pub fn status(&self) -> PostStatus {
        self.status.parse().unwrap_or(PostStatus::Pending)
    }
}

#[cfg(test)]
pub(crate) fn test_post(required_skills: &[&str], status: PostStatus) -> JobPostRow {
    JobPostRow {
        id: Uuid::new_v4(),
        title: "Backend Intern".to_string(),
        description: "Build services".to_string(),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        image_url: "https://img.example.com/acme.png".to_string(),
        required_skills: required_skills.iter().map(|s| s.to_string()).collect(),
        counselor_id: Uuid::new_v4(),
        counselor_name: "Grace Hopper".to_string(),
        status: status.as_str().to_string(),
        created_at: Utc::now(),
        approved_at: None,
        approved_by: None,
        rejection_reason: None,
    }
}
