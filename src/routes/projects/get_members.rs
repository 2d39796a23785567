use axum::{extract::Query, extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ProjectAPIError, ProjectAction, ProjectId, Role},
    utils::{access::require_project_access, auth::get_claims},
    AppState,
};

#[derive(Deserialize)]
pub struct GetMemberListQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
}

#[tracing::instrument(name = "Get member list route handler", skip_all)]
pub async fn get_member_list_for_project(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<GetMemberListQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<MemberListResponse>), ProjectAPIError>
{
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let project_id = ProjectId::new(query_params.project_id);

    require_project_access(
        &state.project_store,
        &claims.id,
        &project_id,
        ProjectAction::ViewProject,
    )
    .await?;

    let member_list = state
        .project_store
        .read()
        .await
        .get_members(&project_id)
        .await
        .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(MemberListResponse {
        project_id: project_id.as_ref().to_string(),
        members: member_list
            .into_iter()
            .map(|member| MemberResponse {
                member_id: member.member_id.as_ref().to_string(),
                user_id: member.user_id.as_ref().to_string(),
                role: member.role,
            })
            .collect(),
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberListResponse {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub members: Vec<MemberResponse>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberResponse {
    #[serde(rename = "memberId")]
    pub member_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub role: Role,
}
