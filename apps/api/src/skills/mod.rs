//! Skill catalog: the common skills list merged with everything counselors
//! have ever required, for profile pickers.

pub mod handlers;

use std::collections::BTreeSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::matching::skills::normalize_skill;

pub const COMMON_SKILLS: &[&str] = &[
    "JavaScript",
    "Python",
    "Java",
    "React",
    "Node.js",
    "HTML/CSS",
    "SQL",
    "Git",
    "AWS",
    "Docker",
    "TypeScript",
    "C++",
    "C#",
    "PHP",
    "Ruby",
    "Go",
    "Swift",
    "Kotlin",
    "Flutter",
    "MongoDB",
    "PostgreSQL",
    "Redis",
    "Kubernetes",
    "Firebase",
    "GraphQL",
    "Project Management",
    "Leadership",
    "Communication",
    "Teamwork",
    "Problem Solving",
    "Critical Thinking",
    "Presentation Skills",
    "Data Analysis",
    "Marketing",
    "Sales",
    "Customer Service",
    "Adobe Creative Suite",
    "Figma",
    "UI/UX Design",
    "Writing",
];

/// Records skills not yet in the catalog. Skills must already be normalized.
pub async fn upsert_skills(
    pool: &PgPool,
    skills: &[String],
    created_by: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO skills (name, created_by)
        SELECT name, $2 FROM UNNEST($1::text[]) AS t(name)
        ON CONFLICT (name) DO NOTHING
        "#,
    )
    .bind(skills)
    .bind(created_by)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn known_skills(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT name FROM skills
        UNION
        SELECT DISTINCT UNNEST(required_skills) FROM job_posts
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Merges common and known skills case-insensitively, capitalizes the first
/// letter for display, and sorts.
pub fn build_catalog<S: AsRef<str>>(known: &[S]) -> Vec<String> {
    let normalized: BTreeSet<String> = COMMON_SKILLS
        .iter()
        .copied()
        .chain(known.iter().map(|s| s.as_ref()))
        .filter_map(normalize_skill)
        .collect();

    let mut catalog: Vec<String> = normalized.iter().map(|s| capitalize(s)).collect();
    catalog.sort();
    catalog
}

fn capitalize(skill: &str) -> String {
    let mut chars = skill.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_merges_case_insensitively() {
        let catalog = build_catalog(&["python", "Rust", "rust", "  "]);
        assert!(catalog.contains(&"Rust".to_string()));
        assert_eq!(catalog.iter().filter(|s| s.eq_ignore_ascii_case("python")).count(), 1);
        assert_eq!(catalog.iter().filter(|s| s.eq_ignore_ascii_case("rust")).count(), 1);
    }

    #[test]
    fn test_catalog_includes_common_skills_and_is_sorted() {
        let catalog = build_catalog::<&str>(&[]);
        assert_eq!(catalog.len(), COMMON_SKILLS.len());
        let mut sorted = catalog.clone();
        sorted.sort();
        assert_eq!(catalog, sorted);
        assert!(catalog.contains(&"Ui/ux design".to_string()));
    }

    #[test]
    fn test_capitalize_first_letter_only() {
        assert_eq!(capitalize("node.js"), "Node.js");
        assert_eq!(capitalize("c#"), "C#");
        assert_eq!(capitalize(""), "");
    }
}
