//! Document Q&A (RAG) service on the AI origin.

use crate::gateway::Gateway;
use commentguard_core::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct LoadRequest<'a> {
    directory_path: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    question: &'a str,
}

/// Answer returned by the chat endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RagAnswer {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Service for the `/rag` endpoints of the AI origin.
pub struct RagService {
    gateway: Arc<Gateway>,
}

impl RagService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Builds the vector index from a document directory on the server.
    pub async fn load_documents(&self, directory_path: &str) -> Result<Value> {
        self.gateway
            .post("/rag/load", &LoadRequest { directory_path })
            .await
    }

    /// Asks a question against the loaded documents.
    pub async fn chat(&self, question: &str) -> Result<RagAnswer> {
        self.gateway.post("/rag/chat", &ChatRequest { question }).await
    }

    /// Drops the vector index.
    pub async fn clear(&self) -> Result<Value> {
        self.gateway.delete("/rag/clear").await
    }
}
