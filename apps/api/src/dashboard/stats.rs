use serde::Serialize;

use crate::models::job_post::{JobPostRow, PostStatus};
use crate::models::user::{Role, UserRow};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostCounts {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserCounts {
    pub total: usize,
    pub students: usize,
    pub counselors: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminDashboard {
    pub users: UserCounts,
    pub posts: PostCounts,
}

pub fn count_posts(posts: &[JobPostRow]) -> PostCounts {
    posts.iter().fold(
        PostCounts {
            total: posts.len(),
            ..Default::default()
        },
        |mut counts, post| {
            match post.status() {
                PostStatus::Pending => counts.pending += 1,
                PostStatus::Approved => counts.approved += 1,
                PostStatus::Rejected => counts.rejected += 1,
            }
            counts
        },
    )
}

pub fn count_users(users: &[UserRow]) -> UserCounts {
    UserCounts {
        total: users.len(),
        students: users.iter().filter(|u| u.role() == Role::Student).count(),
        counselors: users.iter().filter(|u| u.role() == Role::Counselor).count(),
    }
}
