//! Auth Payloads

use serde::{Deserialize, Serialize};

use super::favorite::RecordId;

/// Body of `/auth/login` and `/auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Successful login response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginGrant {
    #[serde(default)]
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: Option<RecordId>,
}

impl LoginGrant {
    /// Both token and user id present and non-empty
    pub fn is_complete(&self) -> bool {
        !self.token.is_empty()
            && self.user_id.as_ref().is_some_and(|id| !id.as_str().is_empty())
    }
}
