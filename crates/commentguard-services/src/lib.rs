//! Service modules wrapping the two backend origins.
//!
//! Each module exposes typed request functions over a shared per-origin
//! [`gateway::Gateway`]. Failures carry the gateway's classification
//! through unchanged, except the template service's 404 fallback.

pub mod admin;
pub mod analysis;
pub mod assistant;
pub mod auth;
pub mod blacklist;
pub mod blocked_words;
pub mod dashboard;
pub mod gateway;
pub mod notices;
pub mod rag;
pub mod suggestions;
pub mod templates;

pub use gateway::Gateway;
