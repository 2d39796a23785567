use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        InviteCode, Member, ProjectAPIError, ProjectId, ProjectStoreError,
        Role,
    },
    utils::{access::require_identity_match, auth::get_claims},
    AppState,
};

/// Redeems an invitation code. Redemption is idempotent per user: joining
/// a project the caller already belongs to is a no-op success. Unknown
/// and expired codes are deliberately indistinguishable to the caller.
#[tracing::instrument(name = "Join project route handler", skip_all)]
pub async fn join_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<JoinProjectRequest>,
) -> Result<(StatusCode, CookieJar, Json<JoinProjectResponse>), ProjectAPIError>
{
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let user_id = require_identity_match(&claims, &request.user_id)?;

    // Format check happens before any store access.
    let code = InviteCode::parse(&request.code)?;
    let project_id = ProjectId::parse(&request.project_id)?;

    let membership = {
        let store = state.project_store.read().await;

        store.get_project(&project_id).await.map_err(|e| match e {
            ProjectStoreError::ProjectIDNotFound => {
                ProjectAPIError::IDNotFoundError(*project_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

        store
            .get_member(&project_id, &user_id)
            .await
            .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))?
    };

    if let Some(member) = membership {
        let response = Json(JoinProjectResponse {
            project_id: project_id.as_ref().to_string(),
            role: member.role,
            message: "Already a member".to_string(),
        });
        return Ok((StatusCode::OK, jar, response));
    }

    let invitation = state
        .project_store
        .read()
        .await
        .get_invitation_code(&project_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::InvitationCodeNotFound => {
                ProjectAPIError::InvalidInvitationCode
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    if invitation.code != code || invitation.is_expired() {
        return Err(ProjectAPIError::InvalidInvitationCode);
    }

    let member = Member::new(project_id.clone(), user_id, Role::Member);
    match state
        .project_store
        .write()
        .await
        .add_member(&member)
        .await
    {
        Ok(()) => (),
        // Lost a race against another join; membership exists either way.
        Err(ProjectStoreError::MemberExists) => (),
        Err(e) => return Err(ProjectAPIError::UnexpectedError(eyre!(e))),
    }

    let response = Json(JoinProjectResponse {
        project_id: project_id.as_ref().to_string(),
        role: Role::Member,
        message: "Joined project".to_string(),
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct JoinProjectRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub code: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct JoinProjectResponse {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub role: Role,
    pub message: String,
}
