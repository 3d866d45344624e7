//! Canonical cache keys per resource.
//!
//! Invalidation matches on the resource name, so every view of one
//! backend collection must build its keys through these helpers rather
//! than spelling resource strings inline.

use crate::query_cache::QueryKey;

pub const NOTICES: &str = "notices";
pub const NOTICE: &str = "notice";
pub const SUGGESTIONS: &str = "suggestions";
pub const ADMIN_USERS: &str = "adminUsers";
pub const BLACKLIST: &str = "blacklist";
pub const BLOCKED_WORDS: &str = "blockedWords";
pub const DASHBOARD: &str = "dashboard";
pub const TEMPLATES: &str = "templates";
pub const ANALYSIS_HISTORY: &str = "analysisHistory";

/// One page of the notice list.
pub fn notices_page(page: u32) -> QueryKey {
    QueryKey::new(NOTICES).with_param(page)
}

/// The unpaged notice list.
pub fn notices_all() -> QueryKey {
    QueryKey::new(NOTICES).with_param("all")
}

/// A single notice detail view.
pub fn notice(id: i64) -> QueryKey {
    QueryKey::new(NOTICE).with_param(id)
}

/// One page of the caller's own suggestions.
pub fn suggestions_mine(page: u32) -> QueryKey {
    QueryKey::new(SUGGESTIONS).with_param("my").with_param(page)
}

/// One page of all users' suggestions (admin view).
pub fn suggestions_all(page: u32) -> QueryKey {
    QueryKey::new(SUGGESTIONS).with_param("all").with_param(page)
}

pub fn admin_users() -> QueryKey {
    QueryKey::new(ADMIN_USERS)
}

pub fn blacklist() -> QueryKey {
    QueryKey::new(BLACKLIST)
}

pub fn blocked_words() -> QueryKey {
    QueryKey::new(BLOCKED_WORDS)
}

pub fn dashboard() -> QueryKey {
    QueryKey::new(DASHBOARD)
}

pub fn templates() -> QueryKey {
    QueryKey::new(TEMPLATES)
}

pub fn analysis_history() -> QueryKey {
    QueryKey::new(ANALYSIS_HISTORY)
}
