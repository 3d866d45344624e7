//! AI writing-assistant service.
//!
//! Talks to the AI microservice origin. Wire payloads are snake_case
//! (`reply_type` and friends); callers use the same parameter names they
//! would anywhere else in the client.

use crate::gateway::Gateway;
use commentguard_core::error::{CommentGuardError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tones accepted by the generation endpoints.
pub const TONES: &[&str] = &["polite", "neutral", "friendly", "formal", "casual"];
/// Reply flavors accepted by the `reply` endpoint.
pub const REPLY_TYPES: &[&str] = &["constructive", "apology", "explanation", "neutral"];

/// Rejects a parameter value outside its accepted set, before any
/// network call is issued.
fn ensure_one_of(what: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(CommentGuardError::invalid_input(format!(
        "unknown {what} '{value}', expected one of: {}",
        allowed.join(", ")
    )))
}

#[derive(Debug, Serialize)]
struct ImproveRequest<'a> {
    text: &'a str,
    tone: &'a str,
    language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    instruction: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ReplyRequest<'a> {
    comment: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a str>,
    reply_type: &'a str,
    language: &'a str,
}

#[derive(Debug, Serialize)]
struct TemplateRequest<'a> {
    situation: &'a str,
    topic: &'a str,
    tone: &'a str,
    language: &'a str,
}

/// One generated alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct WritingSuggestion {
    #[serde(default)]
    pub version: u32,
    pub text: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub confidence: f64,
}

/// Response envelope shared by all three assistant endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantResponse {
    #[serde(default)]
    pub success: bool,
    pub suggestions: Vec<WritingSuggestion>,
    #[serde(default)]
    pub processing_time_ms: f64,
    #[serde(default)]
    pub model_used: Option<String>,
}

/// Service for the `/api/assistant` endpoints of the AI origin.
pub struct AssistantService {
    gateway: Arc<Gateway>,
}

impl AssistantService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Rewrites a text in the requested tone.
    pub async fn improve(
        &self,
        text: &str,
        tone: &str,
        language: &str,
        instruction: Option<&str>,
    ) -> Result<AssistantResponse> {
        ensure_one_of("tone", tone, TONES)?;
        self.gateway
            .post(
                "/api/assistant/improve",
                &ImproveRequest {
                    text,
                    tone,
                    language,
                    instruction,
                },
            )
            .await
    }

    /// Drafts a reply to a comment.
    pub async fn reply(
        &self,
        comment: &str,
        context: Option<&str>,
        reply_type: &str,
        language: &str,
    ) -> Result<AssistantResponse> {
        ensure_one_of("reply type", reply_type, REPLY_TYPES)?;
        self.gateway
            .post(
                "/api/assistant/reply",
                &ReplyRequest {
                    comment,
                    context,
                    reply_type,
                    language,
                },
            )
            .await
    }

    /// Generates a reusable template for a situation.
    pub async fn template(
        &self,
        situation: &str,
        topic: &str,
        tone: &str,
        language: &str,
    ) -> Result<AssistantResponse> {
        ensure_one_of("tone", tone, TONES)?;
        self.gateway
            .post(
                "/api/assistant/template",
                &TemplateRequest {
                    situation,
                    topic,
                    tone,
                    language,
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commentguard_core::session::{SessionPersistence, SessionStore};

    struct NoPersistence;

    impl SessionPersistence for NoPersistence {
        fn save(&self, _: &commentguard_core::session::Session) -> Result<()> {
            Ok(())
        }
        fn load(&self) -> Result<Option<commentguard_core::session::Session>> {
            Ok(None)
        }
        fn clear(&self) -> Result<()> {
            Ok(())
        }
    }

    fn unroutable_service() -> AssistantService {
        let session = Arc::new(SessionStore::new(Arc::new(NoPersistence)));
        AssistantService::new(Arc::new(Gateway::new(
            "http://127.0.0.1:1".to_string(),
            session,
        )))
    }

    #[tokio::test]
    async fn test_unknown_tone_is_rejected_without_network_call() {
        // Unroutable origin: a network attempt would fail differently
        // than the guard, so the error kind proves no call was issued.
        let service = unroutable_service();

        let err = service
            .improve("text", "sarcastic", "en", None)
            .await
            .unwrap_err();

        match err {
            CommentGuardError::InvalidInput(message) => {
                assert!(message.contains("sarcastic"));
            }
            other => panic!("expected guard rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_reply_type_is_rejected_without_network_call() {
        let service = unroutable_service();

        let err = service
            .reply("too slow", None, "sarcastic", "en")
            .await
            .unwrap_err();

        assert!(matches!(err, CommentGuardError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_accepted_tone_reaches_the_network() {
        let service = unroutable_service();

        let err = service
            .improve("text", "polite", "en", None)
            .await
            .unwrap_err();

        // The call went out and failed at the transport, not at the guard.
        assert!(err.is_network());
    }

    #[test]
    fn test_reply_request_uses_snake_case_on_the_wire() {
        let request = ReplyRequest {
            comment: "too slow",
            context: None,
            reply_type: "apology",
            language: "en",
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["reply_type"], "apology");
        assert!(value.get("context").is_none());
    }

    #[test]
    fn test_assistant_response_parses_microservice_shape() {
        let json = r#"{
            "success": true,
            "suggestions": [
                {"version": 1, "text": "Sorry about that!", "tone": "apology",
                 "reasoning": "acknowledges the issue", "confidence": 0.9}
            ],
            "processing_time_ms": 412.5,
            "model_used": "llama-guard"
        }"#;

        let response: AssistantResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert_eq!(response.suggestions[0].text, "Sorry about that!");
    }
}
