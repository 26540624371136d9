// Job posts: counselor submissions, the admin review workflow, persistence.
// Every committed write is announced on the post feed.

pub mod handlers;
pub mod review;
pub mod store;
pub mod validation;
