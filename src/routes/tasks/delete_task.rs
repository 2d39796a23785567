use axum::{extract::Query, extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        ProjectAPIError, ProjectAction, ProjectId, ProjectStoreError, TaskId,
    },
    utils::{access::require_project_access, auth::get_claims},
    AppState,
};

#[derive(Deserialize)]
pub struct DeleteTaskQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
    #[serde(rename = "taskId")]
    task_id: uuid::Uuid,
}

#[tracing::instrument(name = "Delete task route handler", skip_all)]
pub async fn delete_task(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<DeleteTaskQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<DeleteTaskResponse>), ProjectAPIError>
{
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let project_id = ProjectId::new(query_params.project_id);
    let task_id = TaskId::new(query_params.task_id);

    require_project_access(
        &state.project_store,
        &claims.id,
        &project_id,
        ProjectAction::ManageTasks,
    )
    .await?;

    state
        .project_store
        .write()
        .await
        .delete_task(&project_id, &task_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::TaskIDNotFound => {
                ProjectAPIError::IDNotFoundError(*task_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(DeleteTaskResponse {
        message: "Task deleted".to_string(),
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    pub message: String,
}
