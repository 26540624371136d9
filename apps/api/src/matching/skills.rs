//! Case-normalized skill sets.
//!
//! Every comparison in the matcher goes through [`normalize_skill`], so
//! `"Python"`, `" python "` and `"PYTHON"` are the same skill.

use std::collections::HashSet;

/// Trims and lower-cases a skill. Blank input yields `None`.
pub fn normalize_skill(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes a list of skills, dropping blanks and duplicates.
/// First-occurrence order is kept.
pub fn normalize_skill_list<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .filter_map(|s| normalize_skill(s.as_ref()))
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// A set of case-normalized skills. Membership test only; no ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet {
    skills: HashSet<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, raw: &str) -> bool {
        match normalize_skill(raw) {
            Some(skill) => self.skills.insert(skill),
            None => false,
        }
    }

    /// Case-insensitive membership.
    pub fn contains(&self, raw: &str) -> bool {
        normalize_skill(raw)
            .map(|skill| self.skills.contains(&skill))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Number of skills in `self` also present in `other`.
    pub fn overlap(&self, other: &SkillSet) -> usize {
        self.skills
            .iter()
            .filter(|s| other.skills.contains(*s))
            .count()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill.as_ref());
        }
        set
    }
}
