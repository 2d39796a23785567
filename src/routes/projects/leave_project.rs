use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        check_leave, ProjectAPIError, ProjectId, ProjectStoreError,
    },
    utils::{
        access::require_identity_match,
        auth::get_claims,
    },
    AppState,
};

#[tracing::instrument(name = "Leave project route handler", skip_all)]
pub async fn leave_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LeaveProjectRequest>,
) -> Result<(StatusCode, CookieJar, Json<LeaveProjectResponse>), ProjectAPIError>
{
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let user_id = require_identity_match(&claims, &request.user_id)?;
    let project_id = ProjectId::parse(&request.project_id)?;

    let project = state
        .project_store
        .read()
        .await
        .get_project(&project_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::ProjectIDNotFound => {
                ProjectAPIError::IDNotFoundError(*project_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    check_leave(&project, &user_id)
        .map_err(|e| ProjectAPIError::ForbiddenError(e.to_string()))?;

    state
        .project_store
        .write()
        .await
        .remove_member_by_user(&project_id, &user_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::MemberNotFound => {
                ProjectAPIError::IDNotFoundError(*user_id.as_ref())
            }
            ProjectStoreError::ProjectIDNotFound => {
                ProjectAPIError::IDNotFoundError(*project_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(LeaveProjectResponse {
        message: "Left project".to_string(),
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct LeaveProjectRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaveProjectResponse {
    pub message: String,
}
