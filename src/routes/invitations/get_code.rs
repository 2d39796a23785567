use axum::{extract::Query, extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{ProjectAPIError, ProjectAction, ProjectId, ProjectStoreError},
    utils::{access::require_project_access, auth::get_claims},
    AppState,
};

use super::generate_code::InvitationCodeResponse;

#[derive(Deserialize)]
pub struct GetInvitationCodeQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
}

#[tracing::instrument(name = "Get invitation code route handler", skip_all)]
pub async fn get_invitation_code(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<GetInvitationCodeQueryParams>,
) -> Result<
    (StatusCode, CookieJar, Json<InvitationCodeResponse>),
    ProjectAPIError,
> {
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let project_id = ProjectId::new(query_params.project_id);

    require_project_access(
        &state.project_store,
        &claims.id,
        &project_id,
        ProjectAction::ManageInvitations,
    )
    .await?;

    let invitation = state
        .project_store
        .read()
        .await
        .get_invitation_code(&project_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::InvitationCodeNotFound => {
                ProjectAPIError::IDNotFoundError(*project_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(InvitationCodeResponse {
        project_id: project_id.as_ref().to_string(),
        code: invitation.code.as_ref().to_owned(),
        expires_at: invitation.expires_at,
    });

    Ok((StatusCode::OK, jar, response))
}
