use axum::{extract::Query, extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ProjectAPIError, ProjectAction, ProjectId, ProjectStatus, Role},
    utils::{access::require_project_access, auth::get_claims},
    AppState,
};

#[derive(Deserialize)]
pub struct GetProjectQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
}

#[tracing::instrument(name = "Get project route handler", skip_all)]
pub async fn get_project(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<GetProjectQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<ProjectResponse>), ProjectAPIError> {
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let project_id = ProjectId::new(query_params.project_id);

    let (project, membership) = require_project_access(
        &state.project_store,
        &claims.id,
        &project_id,
        ProjectAction::ViewProject,
    )
    .await?;

    let response = Json(ProjectResponse {
        id: project.project_id.as_ref().to_string(),
        name: project.project_name.as_ref().to_owned(),
        description: project.description,
        status: project.status,
        is_public: project.is_public,
        owner_id: project.owner_id.as_ref().to_string(),
        role: membership.map(|m| m.role),
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    #[serde(rename = "isPublic")]
    pub is_public: bool,
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    pub role: Option<Role>,
}
