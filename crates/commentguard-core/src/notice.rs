//! Notice domain records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Category assigned to a notice by its author.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeType {
    #[default]
    General,
    Maintenance,
    Update,
    Event,
}

/// A published notice as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub notice_id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub notice_type: NoticeType,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Fields the client supplies when creating or updating a notice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeDraft {
    pub title: String,
    pub content: String,
    pub notice_type: NoticeType,
}
