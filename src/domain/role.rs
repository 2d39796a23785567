use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability level of a member within a project.
/// Variant order matters: `MEMBER < ADMIN < OWNER`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Member,
    Admin,
    Owner,
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MEMBER" => Ok(Role::Member),
            "ADMIN" => Ok(Role::Admin),
            "OWNER" => Ok(Role::Owner),
            _ => Err(ValidationError::new(format!("Invalid role: {s}"))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Role::Member => "MEMBER",
                Role::Admin => "ADMIN",
                Role::Owner => "OWNER",
            }
        )
    }
}
