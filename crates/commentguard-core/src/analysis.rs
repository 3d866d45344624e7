//! Comment and toxicity-analysis domain records, plus the analysis
//! date-window policy.

use crate::error::{CommentGuardError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A crawled YouTube comment with its analysis verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub comment_id: i64,
    #[serde(default)]
    pub author_identifier: Option<String>,
    pub comment_text: String,
    #[serde(default)]
    pub is_malicious: bool,
    #[serde(default)]
    pub toxicity_score: f64,
    #[serde(default)]
    pub commented_at: Option<NaiveDateTime>,
}

/// One stored analysis result from the history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub analysis_id: i64,
    pub comment_text: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub toxicity_score: f64,
    #[serde(default)]
    pub is_malicious: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub analyzed_at: Option<NaiveDateTime>,
}

/// Toxicity scoring of a single text, as returned by the AI microservice.
///
/// Score fields are nominally in [0, 100]; out-of-range values are clamped
/// by the rendering layer, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAnalysis {
    #[serde(default)]
    pub toxicity_score: f64,
    #[serde(default)]
    pub hate_speech_score: f64,
    #[serde(default)]
    pub profanity_score: f64,
    #[serde(default)]
    pub threat_score: f64,
    #[serde(default)]
    pub violence_score: f64,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_malicious: bool,
    #[serde(default)]
    pub llama_reasoning: Option<String>,
    #[serde(default)]
    pub detected_keywords: Vec<String>,
}

/// Client-side filter applied to a fetched comment listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentFilter {
    #[default]
    All,
    Clean,
    Malicious,
}

impl CommentFilter {
    /// Predicate used to filter a fetched listing. Server order is kept.
    pub fn matches(&self, comment: &Comment) -> bool {
        match self {
            CommentFilter::All => true,
            CommentFilter::Clean => !comment.is_malicious,
            CommentFilter::Malicious => comment.is_malicious,
        }
    }
}

/// Bound on the crawl/analysis date range.
///
/// The maximum span is policy, not a constant: it comes from
/// configuration and defaults to 7 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPolicy {
    pub max_days: i64,
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self { max_days: 7 }
    }
}

/// An inclusive start/end date range for comment analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AnalysisWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The most recent window allowed by the policy, ending today.
    pub fn latest(today: NaiveDate, policy: WindowPolicy) -> Self {
        Self {
            start: today - Duration::days(policy.max_days),
            end: today,
        }
    }

    /// Number of days between start and end.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Rejects a window whose end precedes its start or whose span
    /// exceeds the policy bound.
    pub fn validate(&self, policy: WindowPolicy) -> Result<()> {
        if self.end < self.start {
            return Err(CommentGuardError::invalid_input(
                "end date must not precede start date",
            ));
        }
        if self.span_days() > policy.max_days {
            return Err(CommentGuardError::invalid_input(format!(
                "analysis window must not exceed {} days",
                policy.max_days
            )));
        }
        Ok(())
    }

    /// Returns a window trimmed to the policy bound, keeping the start
    /// date. This is the auto-adjust behavior the dashboard applies when
    /// the user picks a too-wide range.
    pub fn clamped(&self, policy: WindowPolicy) -> Self {
        if self.end < self.start {
            return Self {
                start: self.start,
                end: self.start,
            };
        }
        if self.span_days() > policy.max_days {
            return Self {
                start: self.start,
                end: self.start + Duration::days(policy.max_days),
            };
        }
        *self
    }

    /// Query string pairs for the gateway (`startDate`, `endDate`).
    pub fn query(&self) -> Vec<(String, String)> {
        vec![
            ("startDate".to_string(), self.start.to_string()),
            ("endDate".to_string(), self.end.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_window_within_policy_is_valid() {
        let window = AnalysisWindow::new(date("2026-01-01"), date("2026-01-08"));
        assert!(window.validate(WindowPolicy::default()).is_ok());
    }

    #[test]
    fn test_window_over_policy_is_rejected() {
        let window = AnalysisWindow::new(date("2026-01-01"), date("2026-01-09"));
        let err = window.validate(WindowPolicy::default()).unwrap_err();
        assert!(err.to_string().contains("7 days"));
    }

    #[test]
    fn test_window_end_before_start_is_rejected() {
        let window = AnalysisWindow::new(date("2026-01-08"), date("2026-01-01"));
        assert!(window.validate(WindowPolicy::default()).is_err());
    }

    #[test]
    fn test_clamped_trims_to_policy() {
        let window = AnalysisWindow::new(date("2026-01-01"), date("2026-02-01"));
        let clamped = window.clamped(WindowPolicy::default());
        assert_eq!(clamped.end, date("2026-01-08"));
        assert!(clamped.validate(WindowPolicy::default()).is_ok());
    }

    #[test]
    fn test_clamped_respects_custom_policy() {
        let window = AnalysisWindow::new(date("2026-01-01"), date("2026-02-01"));
        let clamped = window.clamped(WindowPolicy { max_days: 14 });
        assert_eq!(clamped.end, date("2026-01-15"));
    }

    #[test]
    fn test_filter_predicates() {
        let comment = Comment {
            comment_id: 1,
            author_identifier: None,
            comment_text: "hello".into(),
            is_malicious: true,
            toxicity_score: 91.0,
            commented_at: None,
        };
        assert!(CommentFilter::All.matches(&comment));
        assert!(CommentFilter::Malicious.matches(&comment));
        assert!(!CommentFilter::Clean.matches(&comment));
    }

    #[test]
    fn test_text_analysis_snake_case_fields() {
        let json = r#"{
            "toxicity_score": 12.5,
            "hate_speech_score": 0.0,
            "profanity_score": 3.0,
            "threat_score": 0.0,
            "violence_score": 0.0,
            "confidence_score": 88.0,
            "category": "clean",
            "is_malicious": false,
            "llama_reasoning": "benign greeting",
            "detected_keywords": []
        }"#;

        let analysis: TextAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.toxicity_score, 12.5);
        assert!(!analysis.is_malicious);
    }
}
