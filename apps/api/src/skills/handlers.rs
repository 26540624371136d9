use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::Session;
use crate::errors::AppError;
use crate::skills::{build_catalog, known_skills};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SkillCatalogResponse {
    pub skills: Vec<String>,
}

/// GET /api/v1/skills
pub async fn handle_skill_catalog(
    State(state): State<AppState>,
    _session: Session,
) -> Result<Json<SkillCatalogResponse>, AppError> {
    let known = known_skills(&state.db).await?;
    Ok(Json(SkillCatalogResponse {
        skills: build_catalog(&known),
    }))
}
