//! Skill Matcher — partitions approved postings into matched / suggested
//! buckets for one candidate and computes per-posting match percentages.
//!
//! Everything here is synchronous and side-effect free. Callers hand in a
//! snapshot of postings already filtered to `approved`; ordering within each
//! bucket follows that snapshot.

use serde::{Deserialize, Serialize};

use crate::matching::skills::{normalize_skill_list, SkillSet};
use crate::models::job_post::JobPostRow;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Complete, disjoint partition of a postings snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchBuckets {
    pub matched: Vec<JobPostRow>,
    pub suggested: Vec<JobPostRow>,
}

/// Derived, never persisted: which required skills the candidate covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Normalized, in the posting's declared order.
    pub matching_skills: Vec<String>,
    pub match_percentage: u8,
}

// ────────────────────────────────────────────────────────────────────────────
// Core operations
// ────────────────────────────────────────────────────────────────────────────

/// Splits `postings` into postings sharing at least one skill with the
/// candidate (`matched`) and the rest (`suggested`).
///
/// An empty candidate set never matches anything: every posting is suggested.
pub fn compute_matches(candidate_skills: &SkillSet, postings: Vec<JobPostRow>) -> MatchBuckets {
    if candidate_skills.is_empty() {
        return MatchBuckets {
            matched: Vec::new(),
            suggested: postings,
        };
    }

    let (matched, suggested): (Vec<_>, Vec<_>) = postings
        .into_iter()
        .partition(|post| has_overlap(candidate_skills, &post.required_skills));

    MatchBuckets { matched, suggested }
}

/// `round(100 * |required ∩ candidate| / |required|)`, half rounding up.
///
/// A posting with no required skills scores 0: it gives the candidate nothing
/// to match against.
pub fn match_percentage(candidate_skills: &SkillSet, required_skills: &SkillSet) -> u8 {
    let total = required_skills.len();
    if total == 0 {
        return 0;
    }
    let matching = required_skills.overlap(candidate_skills);
    // Integer form of round(100 * m / t): (200m + t) / 2t.
    let pct = (200 * matching + total) / (2 * total);
    pct.min(100) as u8
}

/// Required skills (normalized, posting order) present in the candidate's set.
pub fn matching_skills(candidate_skills: &SkillSet, required_skills: &[String]) -> Vec<String> {
    normalize_skill_list(required_skills)
        .into_iter()
        .filter(|skill| candidate_skills.contains(skill))
        .collect()
}

/// Full per-posting result for display alongside a posting.
pub fn match_result(candidate_skills: &SkillSet, required_skills: &[String]) -> MatchResult {
    let required: SkillSet = required_skills.iter().collect();
    MatchResult {
        matching_skills: matching_skills(candidate_skills, required_skills),
        match_percentage: match_percentage(candidate_skills, &required),
    }
}

fn has_overlap(candidate_skills: &SkillSet, required_skills: &[String]) -> bool {
    required_skills
        .iter()
        .any(|skill| candidate_skills.contains(skill))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
