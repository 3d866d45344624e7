//! Comment listing, crawling and toxicity analysis.
//!
//! Listing and stored results live on the primary origin; text scoring
//! and crawling go to the AI microservice, whose payloads use snake_case
//! field names. Callers of this module see one consistent parameter
//! naming scheme regardless of which origin a call hits.

use crate::gateway::Gateway;
use commentguard_core::analysis::{
    AnalysisRecord, AnalysisWindow, Comment, CommentFilter, TextAnalysis,
};
use commentguard_core::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeCommentRequest {
    comment_id: i64,
}

// AI-origin payloads (snake_case on the wire).

#[derive(Debug, Serialize)]
struct AnalyzeTextRequest<'a> {
    text: &'a str,
    language: &'a str,
    use_dual_model: bool,
}

#[derive(Debug, Serialize)]
struct CrawlRequest<'a> {
    url: &'a str,
}

/// Outcome of a crawl request.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlResult {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub comment_count: Option<u64>,
}

/// Service for comment listings and analysis, spanning both origins.
pub struct AnalysisService {
    api: Arc<Gateway>,
    ai: Arc<Gateway>,
}

impl AnalysisService {
    /// `api` is the primary-origin gateway, `ai` the microservice one.
    pub fn new(api: Arc<Gateway>, ai: Arc<Gateway>) -> Self {
        Self { api, ai }
    }

    /// Crawled comments for a video within the analysis window, with the
    /// client-side status filter applied. Server order is preserved.
    pub async fn get_comments(
        &self,
        video_url: &str,
        window: AnalysisWindow,
        filter: CommentFilter,
    ) -> Result<Vec<Comment>> {
        let mut query = vec![("videoUrl".to_string(), video_url.to_string())];
        query.extend(window.query());

        let comments: Vec<Comment> = self.api.get_query("/comments", &query).await?;
        Ok(comments
            .into_iter()
            .filter(|comment| filter.matches(comment))
            .collect())
    }

    /// Asks the AI origin to crawl a video's comments.
    pub async fn request_crawl(&self, video_url: &str) -> Result<CrawlResult> {
        self.ai
            .post("/crawl/youtube", &CrawlRequest { url: video_url })
            .await
    }

    /// Re-scores one stored comment (primary origin).
    pub async fn analyze_comment(&self, comment_id: i64) -> Result<AnalysisRecord> {
        self.api
            .post("/analysis/comment", &AnalyzeCommentRequest { comment_id })
            .await
    }

    /// Full analysis history (primary origin).
    pub async fn history(&self) -> Result<Vec<AnalysisRecord>> {
        self.api.get("/analysis/history").await
    }

    /// Aggregate analysis counters (primary origin).
    pub async fn stats(&self) -> Result<Value> {
        self.api.get("/analysis/stats").await
    }

    /// Scores a single text against the AI origin.
    pub async fn analyze_text(&self, text: &str) -> Result<TextAnalysis> {
        self.ai
            .post(
                "/analyze/text",
                &AnalyzeTextRequest {
                    text,
                    language: "auto",
                    use_dual_model: true,
                },
            )
            .await
    }
}
