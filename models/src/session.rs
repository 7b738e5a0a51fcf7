// models/src/session.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::medical::User;

/// Server-side record tying a session token to an authenticated user.
///
/// There is no expiry: a session lives until logout deletes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: u64,
    pub username: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Opens a session for `user` with a fresh random token.
    pub fn for_user(user: &User) -> Self {
        Session {
            token: Uuid::new_v4().simple().to_string(),
            user_id: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
            created_at: Utc::now(),
        }
    }
}
