use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        ProjectAPIError, ProjectAction, ProjectId, ProjectStoreError,
        RequestId, RequestStatus,
    },
    utils::{access::require_project_access, auth::get_claims},
    AppState,
};

#[tracing::instrument(name = "Reject membership request route handler", skip_all)]
pub async fn reject_request(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<RejectRequestRequest>,
) -> Result<
    (StatusCode, CookieJar, Json<RejectRequestResponse>),
    ProjectAPIError,
> {
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let project_id = ProjectId::parse(&request.project_id)?;
    let request_id = RequestId::parse(&request.request_id)?;

    require_project_access(
        &state.project_store,
        &claims.id,
        &project_id,
        ProjectAction::ManageRequests,
    )
    .await?;

    let membership_request = state
        .project_store
        .read()
        .await
        .get_membership_request(&request_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::RequestIDNotFound => {
                ProjectAPIError::IDNotFoundError(*request_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;
    if membership_request.project_id != project_id {
        return Err(ProjectAPIError::IDNotFoundError(*request_id.as_ref()));
    }

    state
        .project_store
        .write()
        .await
        .reject_membership_request(&request_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::RequestAlreadyProcessed => {
                ProjectAPIError::ForbiddenError(
                    "Request has already been processed".to_string(),
                )
            }
            ProjectStoreError::RequestIDNotFound => {
                ProjectAPIError::IDNotFoundError(*request_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(RejectRequestResponse {
        request_id: request_id.as_ref().to_string(),
        project_id: project_id.as_ref().to_string(),
        status: RequestStatus::Rejected,
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct RejectRequestRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct RejectRequestResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub status: RequestStatus,
}
