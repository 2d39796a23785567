use axum::{extract::Query, extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ProjectAPIError, ProjectAction, ProjectId, RequestStatus},
    utils::{access::require_project_access, auth::get_claims},
    AppState,
};

#[derive(Deserialize)]
pub struct ListRequestsQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
}

#[tracing::instrument(name = "List membership requests route handler", skip_all)]
pub async fn list_membership_requests(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<ListRequestsQueryParams>,
) -> Result<
    (StatusCode, CookieJar, Json<MembershipRequestListResponse>),
    ProjectAPIError,
> {
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let project_id = ProjectId::new(query_params.project_id);

    require_project_access(
        &state.project_store,
        &claims.id,
        &project_id,
        ProjectAction::ManageRequests,
    )
    .await?;

    let requests = state
        .project_store
        .read()
        .await
        .get_membership_requests(&project_id)
        .await
        .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(MembershipRequestListResponse {
        project_id: project_id.as_ref().to_string(),
        requests: requests
            .into_iter()
            .map(|request| MembershipRequestResponse {
                request_id: request.request_id.as_ref().to_string(),
                user_id: request.user_id.as_ref().to_string(),
                status: request.status,
                created_at: request.created_at,
            })
            .collect(),
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MembershipRequestListResponse {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub requests: Vec<MembershipRequestResponse>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MembershipRequestResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub status: RequestStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
