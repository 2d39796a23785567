use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        Member, ProjectAPIError, ProjectAction, ProjectId,
        ProjectStoreError, RequestId, RequestStatus, Role,
    },
    utils::{access::require_project_access, auth::get_claims},
    AppState,
};

/// Approves a pending request: flips its status and enrolls the requester
/// as a MEMBER in one store operation. A request that is no longer
/// PENDING (processed by another admin in the meantime) is rejected with
/// FORBIDDEN.
#[tracing::instrument(name = "Approve membership request route handler", skip_all)]
pub async fn approve_request(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<ApproveRequestRequest>,
) -> Result<
    (StatusCode, CookieJar, Json<ApproveRequestResponse>),
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

    let member = Member::new(
        project_id.clone(),
        membership_request.user_id,
        Role::Member,
    );

    state
        .project_store
        .write()
        .await
        .approve_membership_request(&request_id, &member)
        .await
        .map_err(|e| match e {
            ProjectStoreError::RequestAlreadyProcessed => {
                ProjectAPIError::ForbiddenError(
                    "Request has already been processed".to_string(),
                )
            }
            ProjectStoreError::MemberExists => {
                ProjectAPIError::ConflictError(
                    "Requester is already a member of this project"
                        .to_string(),
                )
            }
            ProjectStoreError::RequestIDNotFound => {
                ProjectAPIError::IDNotFoundError(*request_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(ApproveRequestResponse {
        request_id: request_id.as_ref().to_string(),
        project_id: project_id.as_ref().to_string(),
        status: RequestStatus::Approved,
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct ApproveRequestRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ApproveRequestResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub status: RequestStatus,
}
