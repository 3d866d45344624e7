//! Blacklist service: channels barred from crawling.

use crate::gateway::Gateway;
use commentguard_core::error::Result;
use commentguard_core::moderation::{BlacklistDraft, BlacklistEntry};
use serde_json::Value;
use std::sync::Arc;

/// Service for the `/blacklist` endpoints of the primary origin.
pub struct BlacklistService {
    gateway: Arc<Gateway>,
}

impl BlacklistService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<BlacklistEntry>> {
        self.gateway.get("/blacklist").await
    }

    pub async fn add(&self, draft: &BlacklistDraft) -> Result<BlacklistEntry> {
        self.gateway.post("/blacklist", draft).await
    }

    pub async fn remove(&self, entry_id: i64) -> Result<()> {
        let _: Value = self
            .gateway
            .delete(&format!("/blacklist/{entry_id}"))
            .await?;
        Ok(())
    }
}
