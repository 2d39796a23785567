use axum::{extract::Query, extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        check_member_removal, MemberId, PermissionError, ProjectAPIError,
        ProjectAction, ProjectId, ProjectStoreError,
    },
    utils::{access::require_project_access, auth::get_claims},
    AppState,
};

#[derive(Deserialize)]
pub struct RemoveMemberQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
    #[serde(rename = "memberId")]
    member_id: uuid::Uuid,
}

#[tracing::instrument(name = "Remove member route handler", skip_all)]
pub async fn remove_member(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<RemoveMemberQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<RemoveMemberResponse>), ProjectAPIError>
{
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let project_id = ProjectId::new(query_params.project_id);
    let member_id = MemberId::new(query_params.member_id);

    let (_project, membership) = require_project_access(
        &state.project_store,
        &claims.id,
        &project_id,
        ProjectAction::ManageMembers,
    )
    .await?;
    let actor = membership.ok_or(ProjectAPIError::ForbiddenError(
        PermissionError::NotAMember.to_string(),
    ))?;

    let target = state
        .project_store
        .read()
        .await
        .get_member_by_id(&project_id, &member_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::MemberNotFound => {
                ProjectAPIError::IDNotFoundError(*member_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    check_member_removal(&actor, &target)
        .map_err(|e| ProjectAPIError::ForbiddenError(e.to_string()))?;

    state
        .project_store
        .write()
        .await
        .remove_member(&project_id, &member_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::MemberNotFound => {
                ProjectAPIError::IDNotFoundError(*member_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(RemoveMemberResponse {
        message: "Member removed".to_string(),
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoveMemberResponse {
    pub message: String,
}
