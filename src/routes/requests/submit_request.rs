use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        MembershipRequest, ProjectAPIError, ProjectId, ProjectStoreError,
        RequestStatus,
    },
    utils::{access::require_identity_match, auth::get_claims},
    AppState,
};

#[tracing::instrument(name = "Request membership route handler", skip_all)]
pub async fn request_membership(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<RequestMembershipRequest>,
) -> Result<
    (StatusCode, CookieJar, Json<RequestMembershipResponse>),
    ProjectAPIError,
> {
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let user_id = require_identity_match(&claims, &request.user_id)?;
    let project_id = ProjectId::parse(&request.project_id)?;

    {
        let store = state.project_store.read().await;

        store.get_project(&project_id).await.map_err(|e| match e {
            ProjectStoreError::ProjectIDNotFound => {
                ProjectAPIError::IDNotFoundError(*project_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

        let membership = store
            .get_member(&project_id, &user_id)
            .await
            .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))?;
        if membership.is_some() {
            return Err(ProjectAPIError::ConflictError(
                "Already a member of this project".to_string(),
            ));
        }
    }

    let membership_request =
        MembershipRequest::new(project_id.clone(), user_id);

    state
        .project_store
        .write()
        .await
        .add_membership_request(&membership_request)
        .await
        .map_err(|e| match e {
            ProjectStoreError::PendingRequestExists => {
                ProjectAPIError::ConflictError(
                    "You already have a pending request for this project"
                        .to_string(),
                )
            }
            ProjectStoreError::ProjectIDNotFound => {
                ProjectAPIError::IDNotFoundError(*project_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(RequestMembershipResponse {
        request_id: membership_request.request_id.as_ref().to_string(),
        project_id: project_id.as_ref().to_string(),
        status: membership_request.status,
    });

    Ok((StatusCode::CREATED, jar, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct RequestMembershipRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestMembershipResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub status: RequestStatus,
}
