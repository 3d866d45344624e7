//! Per-origin HTTP gateway.
//!
//! One [`Gateway`] instance exists per backend origin (the primary REST
//! API and the AI microservice). It attaches the bearer token from the
//! session store, performs the call, and classifies failures into the
//! shared error taxonomy. It never retries; a hung request is left
//! pending (no client-side timeout).

use commentguard_core::error::{CommentGuardError, Result};
use commentguard_core::session::{AuthLifecycle, SessionStore};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// HTTP client bound to one backend origin.
pub struct Gateway {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
    auth_lifecycle: Option<Arc<dyn AuthLifecycle>>,
}

impl Gateway {
    /// Creates a gateway for the given origin base URL.
    ///
    /// A trailing slash on `base_url` is tolerated.
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
            session,
            auth_lifecycle: None,
        }
    }

    /// Registers the hook fired when the server rejects the token.
    pub fn with_auth_lifecycle(mut self, hook: Arc<dyn AuthLifecycle>) -> Self {
        self.auth_lifecycle = Some(hook);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET returning a deserialized body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, &[], None).await
    }

    /// GET with query parameters.
    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        self.request(Method::GET, path, query, None).await
    }

    /// POST with a JSON body.
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, &[], Some(body)).await
    }

    /// POST without a body (resource-specific actions).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::POST, path, &[], None).await
    }

    /// PUT with a JSON body.
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    /// PUT without a body (resource-specific toggles).
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::PUT, path, &[], None).await
    }

    /// DELETE.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, &[], None).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method.clone(), &url);

        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| CommentGuardError::network(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| CommentGuardError::network(err.to_string()))?;

        if status.is_success() {
            let value = parse_body(&text);
            return serde_json::from_value(value).map_err(Into::into);
        }

        Err(self.classify_failure(method, path, status, &text))
    }

    fn classify_failure(
        &self,
        method: Method,
        path: &str,
        status: StatusCode,
        body: &str,
    ) -> CommentGuardError {
        match status {
            StatusCode::UNAUTHORIZED => {
                if let Err(err) = self.session.logout() {
                    tracing::warn!("failed to clear session after 401: {err}");
                }
                if let Some(hook) = &self.auth_lifecycle {
                    hook.on_auth_expired();
                }
                tracing::info!(%path, "session expired, logged out");
                CommentGuardError::AuthExpired
            }
            StatusCode::NOT_FOUND => {
                // Optional endpoints signal "not implemented" with 404;
                // callers with a fallback treat it as such, so keep the
                // log quiet.
                tracing::debug!(%method, %path, "endpoint returned 404");
                CommentGuardError::resource_missing(path)
            }
            _ => {
                let message = extract_server_message(body)
                    .unwrap_or_else(|| format!("server returned {status}"));
                tracing::warn!(%method, %path, %status, "request failed");
                CommentGuardError::request_failed(status.as_u16(), message)
            }
        }
    }
}

/// Decodes a response body: empty becomes `null`, non-JSON text is kept
/// as a string.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Pulls a human-readable message out of a conventional error envelope
/// (`{error | message | detail}`).
fn extract_server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    for key in ["error", "message", "detail"] {
        if let Some(message) = value.get(key).and_then(Value::as_str) {
            if !message.is_empty() {
                return Some(message.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use commentguard_core::session::{Identity, Role, Session, SessionPersistence};
    use mockall::mock;
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    mock! {
        Lifecycle {}
        impl AuthLifecycle for Lifecycle {
            fn on_auth_expired(&self);
        }
    }

    struct MemoryPersistence {
        stored: Mutex<Option<Session>>,
    }

    impl MemoryPersistence {
        fn new() -> Self {
            Self {
                stored: Mutex::new(None),
            }
        }
    }

    impl SessionPersistence for MemoryPersistence {
        fn save(&self, session: &Session) -> commentguard_core::Result<()> {
            *self.stored.lock().unwrap() = Some(session.clone());
            Ok(())
        }
        fn load(&self) -> commentguard_core::Result<Option<Session>> {
            Ok(self.stored.lock().unwrap().clone())
        }
        fn clear(&self) -> commentguard_core::Result<()> {
            *self.stored.lock().unwrap() = None;
            Ok(())
        }
    }

    fn session_store() -> Arc<SessionStore> {
        Arc::new(SessionStore::new(Arc::new(MemoryPersistence::new())))
    }

    fn logged_in_store(token: &str) -> Arc<SessionStore> {
        let store = session_store();
        store
            .set_auth(
                Identity {
                    user_id: 1,
                    email: "user@example.com".to_string(),
                    username: "user".to_string(),
                    role: Role::User,
                },
                token,
            )
            .unwrap();
        store
    }

    /// Serves exactly one canned HTTP response and hands back the raw
    /// request for inspection.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });
        (format!("http://{addr}"), handle)
    }

    #[tokio::test]
    async fn test_success_returns_body_as_is() {
        let (url, _server) = serve_once("HTTP/1.1 200 OK", r#"{"noticeId": 1}"#).await;
        let gateway = Gateway::new(url, session_store());

        let value: Value = gateway.get("/notices/1").await.unwrap();
        assert_eq!(value["noticeId"], 1);
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let (url, server) = serve_once("HTTP/1.1 200 OK", "{}").await;
        let gateway = Gateway::new(url, logged_in_store("tok-xyz"));

        let _: Value = gateway.get("/notices").await.unwrap();
        let request = server.await.unwrap();
        assert!(request.to_lowercase().contains("authorization: bearer tok-xyz"));
    }

    #[tokio::test]
    async fn test_no_token_means_no_authorization_header() {
        let (url, server) = serve_once("HTTP/1.1 200 OK", "{}").await;
        let gateway = Gateway::new(url, session_store());

        let _: Value = gateway.get("/notices").await.unwrap();
        let request = server.await.unwrap();
        assert!(!request.to_lowercase().contains("authorization:"));
    }

    #[tokio::test]
    async fn test_401_clears_session_and_fires_hook() {
        let (url, _server) = serve_once("HTTP/1.1 401 Unauthorized", "{}").await;
        let store = logged_in_store("tok-stale");
        let mut hook = MockLifecycle::new();
        hook.expect_on_auth_expired().times(1).return_const(());
        let gateway = Gateway::new(url, store.clone()).with_auth_lifecycle(Arc::new(hook));

        let err = gateway.get::<Value>("/suggestions").await.unwrap_err();

        assert!(err.is_auth_expired());
        assert!(store.token().is_none());
    }

    #[tokio::test]
    async fn test_after_401_subsequent_calls_carry_no_token() {
        let (url, _server) = serve_once("HTTP/1.1 401 Unauthorized", "{}").await;
        let store = logged_in_store("tok-stale");
        let gateway = Gateway::new(url, store.clone());
        let _ = gateway.get::<Value>("/suggestions").await;

        let (url2, server2) = serve_once("HTTP/1.1 200 OK", "{}").await;
        let gateway2 = Gateway::new(url2, store);
        let _: Value = gateway2.get("/notices").await.unwrap();

        let request = server2.await.unwrap();
        assert!(!request.to_lowercase().contains("authorization:"));
    }

    #[tokio::test]
    async fn test_404_maps_to_resource_missing() {
        let (url, _server) = serve_once("HTTP/1.1 404 Not Found", "{}").await;
        let gateway = Gateway::new(url, session_store());

        let err = gateway.get::<Value>("/templates").await.unwrap_err();
        assert!(err.is_resource_missing());
    }

    #[tokio::test]
    async fn test_failure_message_extracted_from_envelope() {
        let (url, _server) = serve_once(
            "HTTP/1.1 500 Internal Server Error",
            r#"{"message": "crawl worker unavailable"}"#,
        )
        .await;
        let gateway = Gateway::new(url, session_store());

        let err = gateway.get::<Value>("/analysis/stats").await.unwrap_err();
        match err {
            CommentGuardError::RequestFailed {
                status_code,
                message,
            } => {
                assert_eq!(status_code, Some(500));
                assert_eq!(message, "crawl worker unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        // Bind then drop to get a port that refuses connections.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = Gateway::new(format!("http://{addr}"), session_store());
        let err = gateway.get::<Value>("/notices").await.unwrap_err();
        assert!(err.is_network());
    }

    #[test]
    fn test_extract_server_message_precedence() {
        assert_eq!(
            extract_server_message(r#"{"error": "bad", "message": "worse"}"#),
            Some("bad".to_string())
        );
        assert_eq!(
            extract_server_message(r#"{"detail": "fastapi style"}"#),
            Some("fastapi style".to_string())
        );
        assert_eq!(extract_server_message("not json"), None);
    }

    #[test]
    fn test_parse_body_variants() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("  "), Value::Null);
        assert_eq!(parse_body("3"), Value::from(3));
        assert_eq!(parse_body("plain text"), Value::from("plain text"));
    }
}
