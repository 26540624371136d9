use sqlx::PgPool;

use crate::auth::jwt::JwtConfig;
use crate::config::Config;
use crate::feed::PostFeed;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub jwt: JwtConfig,
    /// Change notifications for job posts; drives live student match streams.
    pub feed: PostFeed,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            jwt: JwtConfig::from(&config),
            config,
            feed: PostFeed::default(),
        }
    }
}
