//! Own-account settings, available to every role.
//!
//! Name and email are always resubmitted; a password is only changed when a
//! non-blank one is given.

use serde::Deserialize;

use crate::auth::password::validate_password_strength;
use crate::errors::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct AccountUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub new_password: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidAccountUpdate {
    pub first_name: String,
    pub last_name: String,
    /// Trimmed and lower-cased, matching how sign-in looks accounts up.
    pub email: String,
    pub new_password: Option<String>,
    pub phone_number: Option<String>,
    pub image_url: Option<String>,
}

pub fn validate_account_update(
    update: AccountUpdate,
    min_password_length: usize,
) -> Result<ValidAccountUpdate, AppError> {
    let first_name = update.first_name.trim().to_string();
    let last_name = update.last_name.trim().to_string();
    let email = update.email.trim().to_lowercase();

    if first_name.is_empty() || last_name.is_empty() || email.is_empty() {
        return Err(AppError::Validation(
            "First name, last name, and email are required.".to_string(),
        ));
    }
    if !email.contains('@') {
        return Err(AppError::Validation("email is not valid".to_string()));
    }

    let new_password = update.new_password.filter(|p| !p.is_empty());
    if let Some(password) = &new_password {
        validate_password_strength(password, min_password_length)
            .map_err(AppError::Validation)?;
    }

    Ok(ValidAccountUpdate {
        first_name,
        last_name,
        email,
        new_password,
        phone_number: non_blank(update.phone_number),
        image_url: non_blank(update.image_url),
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

    fn update() -> AccountUpdate {
        AccountUpdate {
            first_name: " Katherine ".to_string(),
            last_name: "Johnson".to_string(),
            email: " K.Johnson@Example.EDU ".to_string(),
            new_password: None,
            phone_number: Some(" 555-0100 ".to_string()),
            image_url: Some("   ".to_string()),
        }
    }

    #[test]
    fn test_valid_update_is_normalized() {
        let valid = validate_account_update(update(), 6).unwrap();
        assert_eq!(valid.first_name, "Katherine");
        assert_eq!(valid.email, "k.johnson@example.edu");
        assert_eq!(valid.phone_number.as_deref(), Some("555-0100"));
        assert_eq!(valid.image_url, None);
        assert_eq!(valid.new_password, None);
    }

    #[test]
    fn test_required_fields() {
        for blank in ["first_name", "last_name", "email"] {
            let mut u = update();
            match blank {
                "first_name" => u.first_name = "  ".to_string(),
                "last_name" => u.last_name = String::new(),
                _ => u.email = " ".to_string(),
            }
            let err = validate_account_update(u, 6).unwrap_err();
            assert!(
                matches!(err, AppError::Validation(ref msg) if msg.contains("are required")),
                "{blank}: {err:?}"
            );
        }
    }

    #[test]
    fn test_malformed_email_rejected() {
        let mut u = update();
        u.email = "not-an-email".to_string();
        assert!(matches!(
            validate_account_update(u, 6),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_short_password_rejected() {
        let mut u = update();
        u.new_password = Some("12345".to_string());
        let err = validate_account_update(u, 6).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("at least 6 characters")));
    }

    #[test]
    fn test_password_kept_at_minimum_and_blank_ignored() {
        let mut u = update();
        u.new_password = Some("123456".to_string());
        let valid = validate_account_update(u, 6).unwrap();
        assert_eq!(valid.new_password.as_deref(), Some("123456"));

        let mut u = update();
        u.new_password = Some(String::new());
        assert_eq!(validate_account_update(u, 6).unwrap().new_password, None);
    }
}
