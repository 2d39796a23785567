use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{
    domain::{
        MemberId, ProjectAPIError, ProjectAction, ProjectId,
        ProjectStoreError, Task, TaskLabel, TaskName, TaskPriority,
        TaskStatus,
    },
    utils::{access::require_project_access, auth::get_claims},
    AppState,
};

#[tracing::instrument(name = "Create new task route handler", skip_all)]
pub async fn new_task(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<NewTaskRequest>,
) -> Result<(StatusCode, CookieJar, Json<TaskResponse>), ProjectAPIError> {
    let claims = get_claims(&jar, &state.banned_token_store).await?;
    let project_id = ProjectId::parse(&request.project_id)?;

    require_project_access(
        &state.project_store,
        &claims.id,
        &project_id,
        ProjectAction::ManageTasks,
    )
    .await?;

    let task_name = TaskName::parse(request.name)?;
    let label = TaskLabel::from_str(&request.label)?;
    let priority = TaskPriority::from_str(&request.priority)?;

    let mut task = Task::new(project_id.clone(), task_name, label, priority);
    task.description = request.description;
    task.due_date = request.due_date;

    if let Some(assignee_id) = &request.assignee_id {
        let member_id = MemberId::parse(assignee_id)?;
        // The assignee must belong to the project.
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
        .add_task(&task)
        .await
        .map_err(|e| match e {
            ProjectStoreError::ProjectIDNotFound => {
                ProjectAPIError::IDNotFoundError(*project_id.as_ref())
            }
            e => ProjectAPIError::UnexpectedError(eyre!(e)),
        })?;

    let response = Json(TaskResponse::from(task));

    Ok((StatusCode::CREATED, jar, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct NewTaskRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub name: String,
    pub label: String,
    pub priority: String,
    pub description: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(rename = "assigneeId")]
    pub assignee_id: Option<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskResponse {
    #[serde(rename = "taskId")]
    pub task_id: String,
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub name: String,
    pub label: TaskLabel,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub description: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(rename = "assigneeId")]
    pub assignee_id: Option<String>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            task_id: task.task_id.as_ref().to_string(),
            project_id: task.project_id.as_ref().to_string(),
            name: task.task_name.as_ref().to_owned(),
            label: task.label,
            status: task.status,
            priority: task.priority,
            description: task.description,
            due_date: task.due_date,
            assignee_id: task
                .assignee
                .map(|member_id| member_id.as_ref().to_string()),
        }
    }
}
