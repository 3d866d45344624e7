pub mod admin;
pub mod analysis;
pub mod assistant;
pub mod auth;
pub mod context;
pub mod dashboard;
pub mod moderation;
pub mod notices;
pub mod rag;
pub mod suggestions;
pub mod templates;
