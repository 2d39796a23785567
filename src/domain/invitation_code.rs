use chrono::{DateTime, Duration, Utc};
use rand::{distributions::Alphanumeric, Rng};

use super::{ProjectId, ValidationError};

pub const INVITATION_CODE_LENGTH: usize = 8;
pub const INVITATION_CODE_TTL_DAYS: i64 = 7;

/// Shared secret granting immediate MEMBER-level entry to a project.
/// Exactly 8 characters from `[0-9A-Za-z]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteCode(String);

impl InviteCode {
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        let regex = regex::Regex::new(r"^[0-9A-Za-z]{8}$")
            .expect("Regex for InviteCode parser is invalid");
        if regex.is_match(code) {
            Ok(Self(code.to_owned()))
        } else {
            Err(ValidationError::new(
                "Invitation code must be exactly 8 alphanumeric characters"
                    .to_string(),
            ))
        }
    }
}

impl Default for InviteCode {
    fn default() -> Self {
        let code: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(INVITATION_CODE_LENGTH)
            .map(char::from)
            .collect();
        Self(code)
    }
}

impl AsRef<String> for InviteCode {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

/// One active code per project; regeneration overwrites code and expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct InvitationCode {
    pub project_id: ProjectId,
    pub code: InviteCode,
    pub expires_at: DateTime<Utc>,
}

impl InvitationCode {
    pub fn issue(project_id: ProjectId) -> Self {
        Self {
            project_id,
            code: InviteCode::default(),
            expires_at: Utc::now() + Duration::days(INVITATION_CODE_TTL_DAYS),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
