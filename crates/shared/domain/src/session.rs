use crate::models::user::{UserStatus, lenient_status};
use crate::role::{Role, session_role};
use serde::{Deserialize, Serialize};

/// The authenticated user as reported by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    #[serde(deserialize_with = "session_role")]
    pub role: Role,
    pub email: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<UserStatus>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Session for one request. Resolved per request and never cached.
///
/// Extra members of the auth payload (token metadata, expiry) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
}

impl Session {
    #[must_use]
    pub const fn role(&self) -> Role {
        self.user.role
    }

    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.user.status == Some(UserStatus::Suspended)
    }
}
