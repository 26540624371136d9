pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::dashboard::handlers as dashboard;
use crate::matching::handlers as matching;
use crate::posts::handlers as posts;
use crate::skills::handlers as skills;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/signup", post(auth::handle_sign_up))
        .route("/api/v1/auth/signin", post(auth::handle_sign_in))
        .route("/api/v1/auth/me", get(auth::handle_me))
        .route("/api/v1/users/me", put(users::handle_update_account))
        // Skills
        .route("/api/v1/skills", get(skills::handle_skill_catalog))
        // Student
        .route("/api/v1/students/me/profile", put(users::handle_save_profile))
        .route("/api/v1/students/me/matches", get(matching::handle_matches))
        .route(
            "/api/v1/students/me/matches/stream",
            get(matching::handle_matches_stream),
        )
        .route("/api/v1/students/me/timeline", get(matching::handle_timeline))
        // Counselor
        .route("/api/v1/posts", post(posts::handle_submit_post))
        .route("/api/v1/posts/mine", get(posts::handle_my_posts))
        .route("/api/v1/posts/:id", put(posts::handle_update_post))
        .route(
            "/api/v1/counselor/dashboard",
            get(dashboard::handle_counselor_dashboard),
        )
        // Admin
        .route("/api/v1/admin/dashboard", get(dashboard::handle_admin_dashboard))
        .route("/api/v1/admin/posts", get(posts::handle_admin_posts))
        .route(
            "/api/v1/admin/posts/:id/approve",
            post(posts::handle_approve_post),
        )
        .route(
            "/api/v1/admin/posts/:id/reject",
            post(posts::handle_reject_post),
        )
        .route(
            "/api/v1/admin/users",
            get(users::handle_list_users).post(users::handle_create_user),
        )
        .route(
            "/api/v1/admin/users/:id/restriction",
            post(users::handle_toggle_restriction),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::test_config;

    /// The pool is lazy: these requests are all answered before any query runs.
    fn test_router() -> Router {
        let config = test_config();
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        build_router(AppState::new(db, config))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_ok() {
        let response = test_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "jobmatch-api");
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        for uri in [
            "/api/v1/auth/me",
            "/api/v1/students/me/matches",
            "/api/v1/students/me/timeline",
            "/api/v1/admin/posts",
            "/api/v1/counselor/dashboard",
        ] {
            let response = test_router()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_account_update_requires_token() {
        let response = test_router()
            .oneshot(
                Request::put("/api/v1/users/me")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"first_name":"A","last_name":"B","email":"a@b.c"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_rejected_with_error_body() {
        let response = test_router()
            .oneshot(
                Request::get("/api/v1/auth/me")
                    .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }
}
