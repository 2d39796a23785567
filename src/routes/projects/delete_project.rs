use axum::{extract::Query, extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ProjectAPIError, ProjectAction, ProjectId, ProjectStoreError},
    utils::{access::require_project_access, auth::get_claims},
    AppState,
};

#[derive(Deserialize)]
pub struct DeleteProjectQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
}

#[tracing::instrument(name = "Delete project route handler", skip_all)]
pub async fn delete_project(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<DeleteProjectQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<DeleteProjectResponse>), ProjectAPIError>
{
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let project_id = ProjectId::new(query_params.project_id);

    require_project_access(
        &state.project_store,
        &claims.id,
        &project_id,
        ProjectAction::DeleteProject,
    )
    .await?;

    state
        .project_store
        .write()
        .await
        .delete_project(&project_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::ProjectIDNotFound => {
                ProjectAPIError::IDNotFoundError(*project_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(DeleteProjectResponse {
        message: "Project deleted".to_string(),
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteProjectResponse {
    pub message: String,
}
