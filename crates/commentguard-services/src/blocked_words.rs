//! Blocked-word service: words filtered out of crawled comments.

use crate::gateway::Gateway;
use commentguard_core::error::Result;
use commentguard_core::moderation::BlockedWord;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct AddWordRequest<'a> {
    word: &'a str,
}

/// Service for the `/blocked-words` endpoints of the primary origin.
pub struct BlockedWordService {
    gateway: Arc<Gateway>,
}

impl BlockedWordService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<BlockedWord>> {
        self.gateway.get("/blocked-words").await
    }

    pub async fn add(&self, word: &str) -> Result<BlockedWord> {
        self.gateway
            .post("/blocked-words", &AddWordRequest { word })
            .await
    }

    pub async fn remove(&self, word_id: i64) -> Result<()> {
        let _: Value = self
            .gateway
            .delete(&format!("/blocked-words/{word_id}"))
            .await?;
        Ok(())
    }
}
