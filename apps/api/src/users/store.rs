use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{Role, StudentProfile, UserRow};
use crate::users::account::ValidAccountUpdate;

/// Fields for a new account. `email` is stored lower-cased.
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
        .bind(email.trim().to_lowercase())
        .fetch_optional(pool)
        .await
}

/// Inserts a new account. Returns `None` when the email is already taken.
pub async fn insert_user(pool: &PgPool, new: NewUser<'_>) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, email, password_hash, role, first_name, last_name)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (email) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.email.trim().to_lowercase())
    .bind(new.password_hash)
    .bind(new.role.as_str())
    .bind(new.first_name.trim())
    .bind(new.last_name.trim())
    .fetch_optional(pool)
    .await
}

pub async fn list_users(pool: &PgPool) -> Result<Vec<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn set_restricted(
    pool: &PgPool,
    user_id: Uuid,
    restricted: bool,
) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        "UPDATE users SET is_restricted = $2 WHERE id = $1 RETURNING *",
    )
    .bind(user_id)
    .bind(restricted)
    .fetch_optional(pool)
    .await
}

pub async fn save_profile(
    pool: &PgPool,
    user_id: Uuid,
    profile: &StudentProfile,
) -> Result<UserRow, sqlx::Error> {
    sqlx::query_as::<_, UserRow>("UPDATE users SET profile = $2 WHERE id = $1 RETURNING *")
        .bind(user_id)
        .bind(Json(profile))
        .fetch_one(pool)
        .await
}

/// Rewrites the caller's own account fields. `password_hash` and `image_url`
/// are kept when not supplied; `phone_number` is replaced as given.
pub async fn update_account(
    pool: &PgPool,
    user_id: Uuid,
    update: &ValidAccountUpdate,
    password_hash: Option<&str>,
) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users
        SET first_name = $2, last_name = $3, email = $4, phone_number = $5,
            image_url = COALESCE($6, image_url),
            password_hash = COALESCE($7, password_hash)
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&update.first_name)
    .bind(&update.last_name)
    .bind(&update.email)
    .bind(&update.phone_number)
    .bind(&update.image_url)
    .bind(password_hash)
    .fetch_optional(pool)
    .await
}

/// True when the write hit the unique constraint on `users.email`.
pub fn is_email_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.is_unique_violation() && db.constraint() == Some("users_email_key")
        }
        _ => false,
    }
}
