//! Request-scoped session context.
//!
//! The signed-in user is resolved per request from the bearer token and
//! handed to handlers as an extractor argument. The database row, not the
//! token, is authoritative for role and restriction status.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::jwt::validate_token;
use crate::errors::AppError;
use crate::models::user::{Role, UserRow};
use crate::state::AppState;
use crate::users::store;

pub const RESTRICTED_MESSAGE: &str = "Your account has been restricted. Please contact support.";

/// The authenticated, unrestricted user making the request.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserRow,
}

impl Session {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role()
    }

    fn require(self, role: Role) -> Result<Self, AppError> {
        if self.role() != role {
            return Err(AppError::Forbidden(format!("{role} role required")));
        }
        Ok(self)
    }
}

/// Restricted accounts are refused on every request, not just at sign-in.
pub fn check_active(user: &UserRow) -> Result<(), AppError> {
    if user.is_restricted {
        return Err(AppError::Forbidden(RESTRICTED_MESSAGE.to_string()));
    }
    Ok(())
}

/// Sign-in outcome once the password has been checked.
/// Order matters: credentials, then the requested role, then restriction.
pub fn check_sign_in(user: &UserRow, requested: Role, verified: bool) -> Result<(), AppError> {
    if !verified {
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }
    if user.role() != requested {
        return Err(AppError::Validation(format!(
            "Your account is not registered as {requested}"
        )));
    }
    check_active(user)
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".to_string())
    })
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(parts)?;
        let claims = validate_token(token, &state.jwt)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        let user = store::find_by_id(&state.db, claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))?;

        check_active(&user)?;
        Ok(Session { user })
    }
}

macro_rules! role_guard {
    ($(#[$meta:meta])* $name:ident, $role:expr) => {
        $(#[$meta])*
        pub struct $name(pub Session);

        #[async_trait]
        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, AppError> {
                let session = Session::from_request_parts(parts, state).await?;
                Ok($name(session.require($role)?))
            }
        }
    };
}

role_guard!(
    /// Rejects anyone but students with 403.
    RequireStudent,
    Role::Student
);
role_guard!(
    /// Rejects anyone but counselors with 403.
    RequireCounselor,
    Role::Counselor
);
role_guard!(
    /// Rejects anyone but admins with 403.
    RequireAdmin,
    Role::Admin
);

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;
    use crate::models::user::test_user;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_extraction() {
        let parts = parts_with(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_or_malformed_header_is_unauthorized() {
        assert!(matches!(
            bearer_token(&parts_with(None)),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            bearer_token(&parts_with(Some("Basic dXNlcjpwYXNz"))),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_restricted_user_is_not_active() {
        let mut user = test_user(Role::Student);
        assert!(check_active(&user).is_ok());

        user.is_restricted = true;
        assert!(matches!(
            check_active(&user),
            Err(AppError::Forbidden(msg)) if msg == RESTRICTED_MESSAGE
        ));
    }

    #[test]
    fn test_sign_in_success() {
        let user = test_user(Role::Counselor);
        assert!(check_sign_in(&user, Role::Counselor, true).is_ok());
    }

    #[test]
    fn test_sign_in_bad_credentials_checked_first() {
        // Wrong role and restricted too: credentials still win.
        let mut user = test_user(Role::Student);
        user.is_restricted = true;
        assert!(matches!(
            check_sign_in(&user, Role::Admin, false),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_sign_in_role_mismatch_before_restriction() {
        let mut user = test_user(Role::Student);
        user.is_restricted = true;
        assert!(matches!(
            check_sign_in(&user, Role::Counselor, true),
            Err(AppError::Validation(msg)) if msg == "Your account is not registered as counselor"
        ));
    }

    #[test]
    fn test_sign_in_restricted_account() {
        let mut user = test_user(Role::Student);
        user.is_restricted = true;
        assert!(matches!(
            check_sign_in(&user, Role::Student, true),
            Err(AppError::Forbidden(msg)) if msg == RESTRICTED_MESSAGE
        ));
    }

    #[test]
    fn test_role_requirement() {
        let session = Session {
            user: test_user(Role::Counselor),
        };
        assert!(session.clone().require(Role::Counselor).is_ok());
        assert!(matches!(
            session.require(Role::Admin),
            Err(AppError::Forbidden(_))
        ));
    }
}
