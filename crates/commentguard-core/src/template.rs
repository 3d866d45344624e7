//! Writing-template records and the local fallback capability.
//!
//! The server-side template endpoint may be unimplemented (signaled by
//! 404). The template service then falls back to a durable local store so
//! the feature keeps working; the store lives behind a trait so both
//! paths can be exercised deterministically in tests.

use crate::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Fixed key under which locally stored templates live.
pub const WRITING_TEMPLATES_KEY: &str = "writingTemplates";

/// A saved writing template.
///
/// `id` is a string so server-assigned numeric ids and locally generated
/// UUIDs coexist in one listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Fields the client supplies when saving a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDraft {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Durable local key-value store used when the template endpoint is
/// absent on the server.
///
/// All templates live under [`WRITING_TEMPLATES_KEY`] as one JSON array,
/// replaced wholesale on every write.
pub trait TemplateFallbackStore: Send + Sync {
    /// Returns all locally stored templates.
    fn list(&self) -> Result<Vec<Template>>;

    /// Appends a template to the local list.
    fn append(&self, template: Template) -> Result<()>;

    /// Removes the template with the given id. Returns whether an entry
    /// was removed.
    fn remove(&self, id: &str) -> Result<bool>;
}
