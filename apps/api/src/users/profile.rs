//! Student profile validation.
//!
//! Skills keep the student's own spelling (first occurrence wins) but are
//! deduplicated case-insensitively, since matching lower-cases anyway.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::matching::skills::normalize_skill;
use crate::models::user::StudentProfile;

const MAX_GPA: f64 = 5.0;

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub skills: Vec<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<i32>,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Deduplicates case-insensitively, keeping the first spelling, trimmed.
pub fn dedupe_skills(raw: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .filter_map(|s| {
            let key = normalize_skill(s)?;
            seen.insert(key).then(|| s.trim().to_string())
        })
        .collect()
}

/// Validates an update and stamps `completed_at`.
pub fn build_profile(update: ProfileUpdate, now: DateTime<Utc>) -> Result<StudentProfile, AppError> {
    let skills = dedupe_skills(&update.skills);
    if skills.is_empty() {
        return Err(AppError::Validation(
            "Please add at least one skill".to_string(),
        ));
    }

    if let Some(gpa) = update.gpa {
        if !(0.0..=MAX_GPA).contains(&gpa) {
            return Err(AppError::Validation(format!(
                "gpa must be between 0 and {MAX_GPA}"
            )));
        }
    }

    Ok(StudentProfile {
        skills,
        phone: non_blank(update.phone),
        major: non_blank(update.major),
        graduation_year: update.graduation_year,
        gpa: update.gpa,
        bio: non_blank(update.bio),
        completed_at: Some(now),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(skills: &[&str]) -> ProfileUpdate {
        ProfileUpdate {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            phone: None,
            major: Some("  Computer Science ".to_string()),
            graduation_year: Some(2027),
            gpa: Some(3.6),
            bio: Some("   ".to_string()),
        }
    }

    #[test]
    fn test_dedupe_keeps_first_spelling() {
        let skills: Vec<String> = ["Node.js", " node.js", "SQL", "", "sql", "Go "]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(dedupe_skills(&skills), vec!["Node.js", "SQL", "Go"]);
    }

    #[test]
    fn test_empty_skills_rejected() {
        let err = build_profile(update(&[]), Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("at least one skill")));

        let err = build_profile(update(&["  ", ""]), Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_gpa_out_of_range_rejected() {
        let mut bad = update(&["Python"]);
        bad.gpa = Some(7.2);
        assert!(build_profile(bad, Utc::now()).is_err());
    }

    #[test]
    fn test_profile_stamped_and_trimmed() {
        let now = Utc::now();
        let profile = build_profile(update(&["Python", "python", "React"]), now).unwrap();
        assert_eq!(profile.skills, vec!["Python", "React"]);
        assert_eq!(profile.major.as_deref(), Some("Computer Science"));
        assert_eq!(profile.bio, None);
        assert_eq!(profile.completed_at, Some(now));
    }
}
