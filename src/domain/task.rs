use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{MemberId, ProjectId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let parsed = uuid::Uuid::try_parse(id).map_err(|e| {
            ValidationError::new(format!("Invalid task ID: {e}"))
        })?;
        Ok(Self(parsed))
    }

    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl AsRef<Uuid> for TaskId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskName(String);

impl TaskName {
    pub fn parse(name: String) -> Result<Self, ValidationError> {
        match name.chars().count() {
            x if x < 1 => Err(ValidationError::new(
                "Task name cannot be empty".to_string(),
            )),
            x if x > 255 => Err(ValidationError::new(
                "Max name length is 255 characters".to_string(),
            )),
            _ => Ok(Self(name)),
        }
    }
}

impl AsRef<String> for TaskName {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskLabel {
    Bug,
    Feature,
    Documentation,
}

impl FromStr for TaskLabel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUG" => Ok(TaskLabel::Bug),
            "FEATURE" => Ok(TaskLabel::Feature),
            "DOCUMENTATION" => Ok(TaskLabel::Documentation),
            _ => Err(ValidationError::new(format!("Invalid task label: {s}"))),
        }
    }
}

impl fmt::Display for TaskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TaskLabel::Bug => "BUG",
                TaskLabel::Feature => "FEATURE",
                TaskLabel::Documentation => "DOCUMENTATION",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Canceled,
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TODO" => Ok(TaskStatus::Todo),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "DONE" => Ok(TaskStatus::Done),
            "CANCELED" => Ok(TaskStatus::Canceled),
            _ => {
                Err(ValidationError::new(format!("Invalid task status: {s}")))
            }
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TaskStatus::Todo => "TODO",
                TaskStatus::InProgress => "IN_PROGRESS",
                TaskStatus::Done => "DONE",
                TaskStatus::Canceled => "CANCELED",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl FromStr for TaskPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(TaskPriority::Low),
            "MEDIUM" => Ok(TaskPriority::Medium),
            "HIGH" => Ok(TaskPriority::High),
            _ => Err(ValidationError::new(format!(
                "Invalid task priority: {s}"
            ))),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TaskPriority::Low => "LOW",
                TaskPriority::Medium => "MEDIUM",
                TaskPriority::High => "HIGH",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub task_id: TaskId,
    pub project_id: ProjectId,
    pub task_name: TaskName,
    pub label: TaskLabel,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee: Option<MemberId>,
}

impl Task {
    pub fn new(
        project_id: ProjectId,
        task_name: TaskName,
        label: TaskLabel,
        priority: TaskPriority,
    ) -> Self {
        Self {
            task_id: TaskId::default(),
            project_id,
            task_name,
            label,
            status: TaskStatus::Todo,
            priority,
            description: None,
            due_date: None,
            assignee: None,
        }
    }
}
