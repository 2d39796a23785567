use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{ProjectId, UserId, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl FromStr for RequestStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(RequestStatus::Pending),
            "APPROVED" => Ok(RequestStatus::Approved),
            "REJECTED" => Ok(RequestStatus::Rejected),
            _ => Err(ValidationError::new(format!(
                "Invalid request status: {s}"
            ))),
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RequestStatus::Pending => "PENDING",
                RequestStatus::Approved => "APPROVED",
                RequestStatus::Rejected => "REJECTED",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let parsed = uuid::Uuid::try_parse(id).map_err(|e| {
            ValidationError::new(format!("Invalid request ID: {e}"))
        })?;
        Ok(Self(parsed))
    }

    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl AsRef<Uuid> for RequestId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

/// Approval-gated request to join a project. At most one PENDING request
/// per (project, user); APPROVED and REJECTED are terminal for the row.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipRequest {
    pub request_id: RequestId,
    pub project_id: ProjectId,
    pub user_id: UserId,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl MembershipRequest {
    pub fn new(project_id: ProjectId, user_id: UserId) -> Self {
        Self {
            request_id: RequestId::default(),
            project_id,
            user_id,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
