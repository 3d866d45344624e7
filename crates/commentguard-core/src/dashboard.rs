//! System-overview statistics, the polled dashboard resource.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One day of analysis activity for the weekly chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPoint {
    /// Short day label (Mon, Tue, ...).
    pub name: String,
    pub count: u64,
}

/// A recent detection shown in the notification list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionNotification {
    pub id: i64,
    #[serde(default)]
    pub is_malicious: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub analyzed_at: Option<NaiveDateTime>,
}

/// Aggregated statistics for the system-overview view.
///
/// Refetched on a fixed interval while the view is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub malicious: u64,
    #[serde(default)]
    pub clean: u64,
    /// Preformatted percentage string, e.g. "12.3%".
    #[serde(default)]
    pub detection_rate: String,
    #[serde(default)]
    pub weekly_activity: Vec<ActivityPoint>,
    #[serde(default)]
    pub notifications: Vec<DetectionNotification>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_deserialize() {
        let json = r#"{
            "total": 120,
            "malicious": 12,
            "clean": 108,
            "detectionRate": "10.0%",
            "weeklyActivity": [{"name": "Mon", "count": 3}],
            "notifications": [{"id": 1, "isMalicious": true, "category": "hate"}]
        }"#;

        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total, 120);
        assert_eq!(stats.weekly_activity[0].name, "Mon");
        assert!(stats.notifications[0].is_malicious);
    }
}
