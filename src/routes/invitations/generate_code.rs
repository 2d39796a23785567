use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        InvitationCode, ProjectAPIError, ProjectAction, ProjectId,
        ProjectStoreError,
    },
    utils::{access::require_project_access, auth::get_claims},
    AppState,
};

/// Issues a fresh code for the project, replacing any previous one. The
/// old code stops working the moment the new one is stored.
#[tracing::instrument(name = "Generate invitation code route handler", skip_all)]
pub async fn generate_invitation_code(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<GenerateInvitationCodeRequest>,
) -> Result<
    (StatusCode, CookieJar, Json<InvitationCodeResponse>),
    ProjectAPIError,
> {
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let project_id = ProjectId::parse(&request.project_id)?;

    require_project_access(
        &state.project_store,
        &claims.id,
        &project_id,
        ProjectAction::ManageInvitations,
    )
    .await?;

    let invitation = InvitationCode::issue(project_id.clone());

    state
        .project_store
        .write()
        .await
        .upsert_invitation_code(&invitation)
        .await
        .map_err(|e| match e {
            ProjectStoreError::ProjectIDNotFound => {
                ProjectAPIError::IDNotFoundError(*project_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(InvitationCodeResponse {
        project_id: project_id.as_ref().to_string(),
        code: invitation.code.as_ref().to_owned(),
        expires_at: invitation.expires_at,
    });

    Ok((StatusCode::CREATED, jar, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct GenerateInvitationCodeRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct InvitationCodeResponse {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub code: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}
