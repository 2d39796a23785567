use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{ProjectId, ProjectName, UserId, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Building,
    Live,
}

impl FromStr for ProjectStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUILDING" => Ok(ProjectStatus::Building),
            "LIVE" => Ok(ProjectStatus::Live),
            _ => Err(ValidationError::new(format!(
                "Invalid project status: {s}"
            ))),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ProjectStatus::Building => "BUILDING",
                ProjectStatus::Live => "LIVE",
            }
        )
    }
}

/// `owner_id` is the authoritative owner fact. The matching OWNER member
/// row is written by the same store operation that inserts the project.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub project_id: ProjectId,
    pub project_name: ProjectName,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub is_public: bool,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(
        project_name: ProjectName,
        description: Option<String>,
        is_public: bool,
        owner_id: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            project_id: ProjectId::default(),
            project_name,
            description,
            status: ProjectStatus::Building,
            is_public,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}
