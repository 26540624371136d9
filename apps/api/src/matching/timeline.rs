//! Student timeline: matched postings, newest approval first, each annotated
//! with the skills it shares with the candidate.

use serde::Serialize;

use crate::matching::matcher::{compute_matches, match_result, MatchResult};
use crate::matching::skills::SkillSet;
use crate::models::job_post::JobPostRow;

#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry {
    #[serde(flatten)]
    pub post: JobPostRow,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Builds the timeline from a snapshot of approved postings.
///
/// Postings missing `approved_at` sort after every dated one; ties keep
/// snapshot order.
pub fn timeline(candidate_skills: &SkillSet, postings: Vec<JobPostRow>) -> Vec<TimelineEntry> {
    let mut matched = compute_matches(candidate_skills, postings).matched;
    // Option<T> orders None first; reverse so newest dates lead and None trails.
    matched.sort_by(|a, b| b.approved_at.cmp(&a.approved_at));

    matched
        .into_iter()
        .map(|post| {
            let result = match_result(candidate_skills, &post.required_skills);
            TimelineEntry { post, result }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::models::job_post::{test_post, PostStatus};

    fn approved_at(required: &[&str], days_ago: Option<i64>) -> JobPostRow {
        let mut post = test_post(required, PostStatus::Approved);
        post.approved_at = days_ago.map(|d| Utc::now() - Duration::days(d));
        post
    }

    #[test]
    fn test_orders_by_approval_newest_first() {
        let old = approved_at(&["python"], Some(10));
        let undated = approved_at(&["python"], None);
        let fresh = approved_at(&["sql"], Some(1));
        let unrelated = approved_at(&["java"], Some(0));
        let expected = vec![fresh.id, old.id, undated.id];

        let candidate: SkillSet = ["Python", "SQL"].into_iter().collect();
        let entries = timeline(&candidate, vec![old, undated, fresh, unrelated]);

        let got: Vec<_> = entries.iter().map(|e| e.post.id).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_entries_carry_match_percentage() {
        let post = approved_at(&["Python", "React"], Some(1));
        let candidate: SkillSet = ["python", "sql"].into_iter().collect();

        let entries = timeline(&candidate, vec![post]);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].result.match_percentage, 50);
        assert_eq!(entries[0].result.matching_skills, vec!["python"]);
    }

    #[test]
    fn test_empty_profile_yields_empty_timeline() {
        let entries = timeline(&SkillSet::new(), vec![approved_at(&["python"], Some(1))]);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_entry_serializes_flat() {
        let post = approved_at(&["rust"], Some(2));
        let candidate: SkillSet = ["rust"].into_iter().collect();
        let entries = timeline(&candidate, vec![post]);

        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["match_percentage"], 100);
        assert_eq!(json["title"], "Backend Intern");
        assert_eq!(json["matching_skills"][0], "rust");
    }
}
