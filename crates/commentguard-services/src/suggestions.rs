//! Suggestion service: submit suggestions and manage admin responses.

use crate::gateway::Gateway;
use commentguard_core::error::Result;
use commentguard_core::page::{Page, PageRequest};
use commentguard_core::suggestion::{Suggestion, SuggestionStatus};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct CreateSuggestionRequest<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct RespondRequest<'a> {
    response: &'a str,
    status: SuggestionStatus,
}

#[derive(Debug, Serialize)]
struct StatusRequest {
    status: SuggestionStatus,
}

/// Service for the `/suggestions` endpoints of the primary origin.
pub struct SuggestionService {
    gateway: Arc<Gateway>,
}

impl SuggestionService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// The caller's own suggestions. Defaults to page 0, size 5.
    pub async fn list_mine(&self, page: PageRequest) -> Result<Page<Suggestion>> {
        self.gateway.get_query("/suggestions", &page.query()).await
    }

    /// Every user's suggestions (admin only).
    pub async fn list_all(&self, page: PageRequest) -> Result<Page<Suggestion>> {
        self.gateway
            .get_query("/suggestions/all", &page.query())
            .await
    }

    pub async fn get(&self, suggestion_id: i64) -> Result<Suggestion> {
        self.gateway
            .get(&format!("/suggestions/{suggestion_id}"))
            .await
    }

    pub async fn create(&self, title: &str, content: &str) -> Result<Suggestion> {
        self.gateway
            .post("/suggestions", &CreateSuggestionRequest { title, content })
            .await
    }

    /// Admin response, which also moves the status.
    pub async fn respond(
        &self,
        suggestion_id: i64,
        response: &str,
        status: SuggestionStatus,
    ) -> Result<Suggestion> {
        self.gateway
            .post(
                &format!("/suggestions/{suggestion_id}/response"),
                &RespondRequest { response, status },
            )
            .await
    }

    /// Status change without a response text (admin only).
    pub async fn update_status(
        &self,
        suggestion_id: i64,
        status: SuggestionStatus,
    ) -> Result<Suggestion> {
        self.gateway
            .put(
                &format!("/suggestions/{suggestion_id}/status"),
                &StatusRequest { status },
            )
            .await
    }
}
