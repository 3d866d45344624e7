//! Notice service: list, read, author and pin notices.

use crate::gateway::Gateway;
use commentguard_core::error::Result;
use commentguard_core::notice::{Notice, NoticeDraft};
use commentguard_core::page::{Page, PageRequest};
use serde_json::Value;
use std::sync::Arc;

/// Service for the `/notices` endpoints of the primary origin.
pub struct NoticeService {
    gateway: Arc<Gateway>,
}

impl NoticeService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Paged listing (admin manager view). Defaults to page 0, size 10.
    pub async fn list(&self, page: PageRequest) -> Result<Page<Notice>> {
        self.gateway.get_query("/notices", &page.query()).await
    }

    /// Unpaged listing for the user-facing notice board.
    pub async fn list_all(&self) -> Result<Vec<Notice>> {
        self.gateway.get("/notices/all").await
    }

    pub async fn get(&self, notice_id: i64) -> Result<Notice> {
        self.gateway.get(&format!("/notices/{notice_id}")).await
    }

    pub async fn create(&self, draft: &NoticeDraft) -> Result<Notice> {
        self.gateway.post("/notices", draft).await
    }

    pub async fn update(&self, notice_id: i64, draft: &NoticeDraft) -> Result<Notice> {
        self.gateway
            .put(&format!("/notices/{notice_id}"), draft)
            .await
    }

    pub async fn delete(&self, notice_id: i64) -> Result<()> {
        let _: Value = self
            .gateway
            .delete(&format!("/notices/{notice_id}"))
            .await?;
        Ok(())
    }

    /// Flips the pinned flag on a notice.
    pub async fn toggle_pin(&self, notice_id: i64) -> Result<Notice> {
        self.gateway
            .put_empty(&format!("/notices/{notice_id}/pin"))
            .await
    }
}
