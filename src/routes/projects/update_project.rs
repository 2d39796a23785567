use axum::{extract::Query, extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{
    domain::{
        ProjectAPIError, ProjectAction, ProjectId, ProjectName,
        ProjectStatus, ProjectStoreError,
    },
    utils::{access::require_project_access, auth::get_claims},
    AppState,
};

#[derive(Deserialize)]
pub struct UpdateProjectQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
}

#[tracing::instrument(name = "Update project route handler", skip_all)]
pub async fn update_project(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<UpdateProjectQueryParams>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<(StatusCode, CookieJar, Json<UpdateProjectResponse>), ProjectAPIError>
{
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let project_id = ProjectId::new(query_params.project_id);

    let (mut project, _membership) = require_project_access(
        &state.project_store,
        &claims.id,
        &project_id,
        ProjectAction::UpdateProject,
    )
    .await?;

    if let Some(name) = request.name {
        project.project_name = ProjectName::parse(&name)?;
    }
    if let Some(description) = request.description {
        project.description = Some(description);
    }
    if let Some(status) = request.status {
        project.status = ProjectStatus::from_str(&status)?;
    }
    if let Some(is_public) = request.is_public {
        project.is_public = is_public;
    }
    project.updated_at = Utc::now();

    state
        .project_store
        .write()
        .await
        .update_project(&project)
        .await
        .map_err(|e| match e {
            ProjectStoreError::ProjectIDNotFound => {
                ProjectAPIError::IDNotFoundError(*project_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(UpdateProjectResponse {
        id: project.project_id.as_ref().to_string(),
        name: project.project_name.as_ref().to_owned(),
        status: project.status,
        is_public: project.is_public,
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "isPublic")]
    pub is_public: Option<bool>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateProjectResponse {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    #[serde(rename = "isPublic")]
    pub is_public: bool,
}
