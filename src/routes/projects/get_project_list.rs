use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ProjectAPIError, ProjectStatus},
    utils::auth::get_claims,
    AppState,
};

#[tracing::instrument(name = "Get project list route handler", skip_all)]
pub async fn get_project_list(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar, Json<ProjectListResponse>), ProjectAPIError>
{
    let claims = get_claims(&jar, &state.banned_token_store).await?;

    let project_list = state
        .project_store
        .read()
        .await
        .get_projects_for_user(&claims.id)
        .await
        .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(ProjectListResponse {
        projects: project_list
            .into_iter()
            .map(|project| ProjectSummary {
                id: project.project_id.as_ref().to_string(),
                name: project.project_name.as_ref().to_owned(),
                status: project.status,
                is_public: project.is_public,
            })
            .collect(),
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectSummary>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    #[serde(rename = "isPublic")]
    pub is_public: bool,
}
