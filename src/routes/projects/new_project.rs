use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Member, Project, ProjectAPIError, ProjectName, Role},
    utils::auth::get_claims,
    AppState,
};

#[tracing::instrument(name = "Create new project route handler", skip_all)]
pub async fn new_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<NewProjectRequest>,
) -> Result<(StatusCode, CookieJar, Json<NewProjectResponse>), ProjectAPIError>
{
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let project_name = ProjectName::parse(&request.name)?;

    let project = Project::new(
        project_name,
        request.description,
        request.is_public,
        claims.id.clone(),
    );
    let owner =
        Member::new(project.project_id.clone(), claims.id, Role::Owner);

    state
        .project_store
        .write()
        .await
        .add_project(&project, &owner)
        .await
        .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(NewProjectResponse {
        id: project.project_id.as_ref().to_string(),
        name: project.project_name.as_ref().to_string(),
        is_public: project.is_public,
    });

    Ok((StatusCode::CREATED, jar, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct NewProjectResponse {
    pub name: String,
    pub id: String,
    #[serde(rename = "isPublic")]
    pub is_public: bool,
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct NewProjectRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "isPublic", default)]
    pub is_public: bool,
}
