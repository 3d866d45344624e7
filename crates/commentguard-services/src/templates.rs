//! Writing-template service with a silent local fallback.
//!
//! The `/templates` endpoint is optional on the server. When it answers
//! 404 the service transparently performs the equivalent operation on the
//! injected fallback store, so the feature keeps working with no visible
//! error. Every other failure propagates unchanged.

use crate::gateway::Gateway;
use chrono::Utc;
use commentguard_core::error::Result;
use commentguard_core::template::{Template, TemplateDraft, TemplateFallbackStore};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Service for the `/templates` endpoints of the primary origin.
pub struct TemplateService {
    gateway: Arc<Gateway>,
    fallback: Arc<dyn TemplateFallbackStore>,
}

impl TemplateService {
    pub fn new(gateway: Arc<Gateway>, fallback: Arc<dyn TemplateFallbackStore>) -> Self {
        Self { gateway, fallback }
    }

    pub async fn list(&self) -> Result<Vec<Template>> {
        match self.gateway.get("/templates").await {
            Ok(templates) => Ok(templates),
            Err(err) if err.is_resource_missing() => {
                tracing::debug!("template endpoint absent, listing from local store");
                self.fallback.list()
            }
            Err(err) => Err(err),
        }
    }

    pub async fn create(&self, draft: &TemplateDraft) -> Result<Template> {
        match self.gateway.post("/templates", draft).await {
            Ok(template) => Ok(template),
            Err(err) if err.is_resource_missing() => {
                tracing::debug!("template endpoint absent, saving to local store");
                let template = Template {
                    id: Uuid::new_v4().to_string(),
                    title: draft.title.clone(),
                    content: draft.content.clone(),
                    category: draft.category.clone(),
                    created_at: Some(Utc::now().naive_utc()),
                };
                self.fallback.append(template.clone())?;
                Ok(template)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        match self.gateway.delete::<Value>(&format!("/templates/{id}")).await {
            Ok(_) => Ok(()),
            Err(err) if err.is_resource_missing() => {
                tracing::debug!("template endpoint absent, deleting from local store");
                self.fallback.remove(id)?;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commentguard_core::error::CommentGuardError;
    use commentguard_core::session::{SessionPersistence, SessionStore};
    use commentguard_core::template::TemplateFallbackStore;
    use commentguard_infrastructure::LocalStore;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

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

    /// Answers every request with the same canned status until dropped.
    async fn serve_status(status_line: &'static str) -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    break;
                };
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "{status_line}\r\ncontent-type: application/json\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{{}}"
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        (format!("http://{addr}"), handle)
    }

    fn service_with(url: String, dir: &TempDir) -> TemplateService {
        let session = Arc::new(SessionStore::new(Arc::new(NoPersistence)));
        let gateway = Arc::new(Gateway::new(url, session));
        let store = Arc::new(LocalStore::with_path(dir.path().join("local_store.json")));
        TemplateService::new(gateway, store)
    }

    #[tokio::test]
    async fn test_404_falls_back_to_local_store() {
        let (url, server) = serve_status("HTTP/1.1 404 Not Found").await;
        let dir = TempDir::new().unwrap();
        let service = service_with(url, &dir);

        let created = service
            .create(&TemplateDraft {
                title: "Greeting".to_string(),
                content: "Hello!".to_string(),
                category: None,
            })
            .await
            .unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Greeting");

        service.delete(&created.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());

        server.abort();
    }

    #[tokio::test]
    async fn test_server_templates_win_when_endpoint_exists() {
        let (url, server) = serve_status("HTTP/1.1 404 Not Found").await;
        let dir = TempDir::new().unwrap();

        // Seed the local store through the fallback path.
        {
            let service = service_with(url.clone(), &dir);
            service
                .create(&TemplateDraft {
                    title: "Local".to_string(),
                    content: "body".to_string(),
                    category: None,
                })
                .await
                .unwrap();
        }
        server.abort();

        // An implemented endpoint answers with its own list; the local
        // store is not consulted.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let body = r#"[{"id": "42", "title": "Server", "content": "body"}]"#;
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
        });

        let service = service_with(format!("http://{addr}"), &dir);
        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Server");
    }

    #[tokio::test]
    async fn test_other_errors_propagate() {
        let (url, server) = serve_status("HTTP/1.1 500 Internal Server Error").await;
        let dir = TempDir::new().unwrap();
        let service = service_with(url, &dir);

        let err = service.list().await.unwrap_err();
        match err {
            CommentGuardError::RequestFailed { status_code, .. } => {
                assert_eq!(status_code, Some(500));
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
        // Nothing was written locally.
        assert!(
            LocalStore::with_path(dir.path().join("local_store.json"))
                .list()
                .unwrap()
                .is_empty()
        );

        server.abort();
    }
}
