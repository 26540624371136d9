// Skill matching: pure functions over in-memory snapshots of postings.
// Handlers fetch approved postings and the student profile, then call into here.

pub mod handlers;
pub mod matcher;
pub mod skills;
pub mod timeline;

pub use matcher::compute_matches;
pub use skills::SkillSet;
pub use timeline::{timeline, TimelineEntry};
