use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use serde::Deserialize;
use std::str::FromStr;

use crate::{
    domain::{
        MemberId, ProjectAPIError, ProjectAction, ProjectId,
        ProjectStoreError, TaskId, TaskLabel, TaskName, TaskPriority,
        TaskStatus,
    },
    utils::{access::require_project_access, auth::get_claims},
    AppState,
};

use super::new_task::TaskResponse;

#[tracing::instrument(name = "Update task route handler", skip_all)]
pub async fn update_task(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<(StatusCode, CookieJar, Json<TaskResponse>), ProjectAPIError> {
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let project_id = ProjectId::parse(&request.project_id)?;
    let task_id = TaskId::parse(&request.task_id)?;

    require_project_access(
        &state.project_store,
        &claims.id,
        &project_id,
        ProjectAction::ManageTasks,
    )
    .await?;

    let mut task = state
        .project_store
        .read()
        .await
        .get_task(&project_id, &task_id)
        .await
        .map_err(|e| match e {
            ProjectStoreError::TaskIDNotFound => {
                ProjectAPIError::IDNotFoundError(*task_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    if let Some(name) = request.name {
        task.task_name = TaskName::parse(name)?;
    }
    if let Some(label) = request.label {
        task.label = TaskLabel::from_str(&label)?;
    }
    if let Some(status) = request.status {
        task.status = TaskStatus::from_str(&status)?;
    }
    if let Some(priority) = request.priority {
        task.priority = TaskPriority::from_str(&priority)?;
    }
    if let Some(description) = request.description {
        task.description = Some(description);
    }
    if let Some(due_date) = request.due_date {
        task.due_date = Some(due_date);
    }
    if let Some(assignee_id) = &request.assignee_id {
        let member_id = MemberId::parse(assignee_id)?;
        state
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
        task.assignee = Some(member_id);
    }

    state
        .project_store
        .write()
        .await
        .update_task(&task)
        .await
        .map_err(|e| match e {
            ProjectStoreError::TaskIDNotFound => {
                ProjectAPIError::IDNotFoundError(*task_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(TaskResponse::from(task));

    Ok((StatusCode::OK, jar, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "taskId")]
    pub task_id: String,
    pub name: Option<String>,
    pub label: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(rename = "assigneeId")]
    pub assignee_id: Option<String>,
}
