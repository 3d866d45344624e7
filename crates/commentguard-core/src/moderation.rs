//! Moderation domain records: managed users, blacklist, blocked words.

use crate::session::Role;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An account as seen in the admin user-management view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub user_id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub suspended: bool,
    #[serde(default)]
    pub suspended_until: Option<NaiveDateTime>,
    #[serde(default)]
    pub flagged: bool,
    #[serde(default)]
    pub flag_reason: Option<String>,
}

impl AdminUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A blacklisted channel or commenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistEntry {
    pub entry_id: i64,
    pub channel_name: String,
    pub channel_identifier: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub detection_count: u64,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Fields the client supplies when blacklisting a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistDraft {
    pub channel_name: String,
    pub channel_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A word filtered out of crawled comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedWord {
    pub word_id: i64,
    pub word: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}
