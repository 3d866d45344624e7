pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod moderation;
pub mod notice;
pub mod page;
pub mod session;
pub mod suggestion;
pub mod template;

// Re-export common error type
pub use error::{CommentGuardError, Result};
