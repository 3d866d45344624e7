//! Suggestion domain records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Lifecycle state of a suggestion, driven by admin actions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionStatus {
    #[default]
    Submitted,
    InProgress,
    Completed,
    Rejected,
}

/// A user-submitted suggestion, optionally answered by an admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub suggestion_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: SuggestionStatus,
    #[serde(default)]
    pub admin_response: Option<String>,
    #[serde(default)]
    pub responded_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&SuggestionStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
    }

    #[test]
    fn test_suggestion_minimal_payload() {
        let json = r#"{"suggestionId": 1, "title": "Bug", "content": "X"}"#;
        let s: Suggestion = serde_json::from_str(json).unwrap();
        assert_eq!(s.status, SuggestionStatus::Submitted);
        assert!(s.admin_response.is_none());
    }
}
