use axum::{extract::Query, extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ProjectAPIError, ProjectAction, ProjectId},
    utils::{access::require_project_access, auth::get_claims},
    AppState,
};

use super::new_task::TaskResponse;

#[derive(Deserialize)]
pub struct GetTasksQueryParams {
    #[serde(rename = "projectId")]
    project_id: uuid::Uuid,
}

#[tracing::instrument(name = "Get tasks route handler", skip_all)]
pub async fn get_tasks(
    State(state): State<AppState>,
    jar: CookieJar,
    query_params: Query<GetTasksQueryParams>,
) -> Result<(StatusCode, CookieJar, Json<TaskListResponse>), ProjectAPIError>
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

    let tasks = state
        .project_store
        .read()
        .await
        .get_tasks(&project_id)
        .await
        .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(TaskListResponse {
        project_id: project_id.as_ref().to_string(),
        tasks: tasks.into_iter().map(TaskResponse::from).collect(),
    });

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskListResponse {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub tasks: Vec<TaskResponse>,
}
