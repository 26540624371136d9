//! Draft validation for counselor submissions.

use serde::Deserialize;

use crate::errors::AppError;
use crate::matching::skills::normalize_skill_list;

#[derive(Debug, Clone, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub image_url: String,
    pub required_skills: Vec<String>,
}

/// A draft that passed validation: fields trimmed, skills normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub image_url: String,
    pub required_skills: Vec<String>,
}

pub fn validate_draft(draft: PostDraft) -> Result<ValidDraft, AppError> {
    let fields = [
        ("title", &draft.title),
        ("description", &draft.description),
        ("company", &draft.company),
        ("location", &draft.location),
        ("image_url", &draft.image_url),
    ];
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing fields: {}",
            missing.join(", ")
        )));
    }

    let required_skills = normalize_skill_list(&draft.required_skills);
    if required_skills.is_empty() {
        return Err(AppError::Validation(
            "Add at least one required skill".to_string(),
        ));
    }

    Ok(ValidDraft {
        title: draft.title.trim().to_string(),
        description: draft.description.trim().to_string(),
        company: draft.company.trim().to_string(),
        location: draft.location.trim().to_string(),
        image_url: draft.image_url.trim().to_string(),
        required_skills,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PostDraft {
        PostDraft {
            title: " Data Intern ".to_string(),
            description: "Crunch numbers".to_string(),
            company: "Initech".to_string(),
            location: "Austin".to_string(),
            image_url: "https://img.example.com/initech.png".to_string(),
            required_skills: vec![
                "SQL".to_string(),
                " Python ".to_string(),
                "sql".to_string(),
                "".to_string(),
            ],
        }
    }

    #[test]
    fn test_valid_draft_is_trimmed_and_normalized() {
        let valid = validate_draft(draft()).unwrap();
        assert_eq!(valid.title, "Data Intern");
        assert_eq!(valid.required_skills, vec!["sql", "python"]);
    }

    #[test]
    fn test_blank_fields_listed() {
        let mut d = draft();
        d.company = "   ".to_string();
        d.image_url = String::new();
        let err = validate_draft(d).unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("company"));
                assert!(msg.contains("image_url"));
                assert!(!msg.contains("title"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_no_skills_rejected() {
        let mut d = draft();
        d.required_skills = vec!["  ".to_string()];
        assert!(matches!(validate_draft(d), Err(AppError::Validation(_))));
    }
}
