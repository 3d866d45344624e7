//! Shared wiring for every command: config, session, gateways, cache.

use anyhow::Result;
use commentguard_application::QueryCache;
use commentguard_core::config::RootConfig;
use commentguard_core::session::{AuthLifecycle, SessionStore};
use commentguard_infrastructure::{ConfigService, FileSessionStorage, LocalStore};
use commentguard_services::Gateway;
use std::sync::Arc;

/// Prints a hint when the server rejects the stored token. The session
/// has already been cleared by the gateway at that point.
struct ExpiryNotice;

impl AuthLifecycle for ExpiryNotice {
    fn on_auth_expired(&self) {
        eprintln!("⚠️  Session expired. Run 'commentguard login' to sign in again.");
    }
}

/// Everything a command needs, built once at startup.
pub struct AppContext {
    pub config: RootConfig,
    pub session: Arc<SessionStore>,
    /// Gateway for the primary REST API origin.
    pub api: Arc<Gateway>,
    /// Gateway for the AI microservice origin.
    pub ai: Arc<Gateway>,
    pub cache: QueryCache,
    pub local_store: Arc<LocalStore>,
}

impl AppContext {
    pub fn init() -> Result<Self> {
        let config = ConfigService::new().get_config();

        let storage = Arc::new(FileSessionStorage::new()?);
        let session = Arc::new(SessionStore::new(storage));
        session.restore()?;

        let hook: Arc<dyn AuthLifecycle> = Arc::new(ExpiryNotice);
        let api = Arc::new(
            Gateway::new(config.api_base_url.clone(), session.clone())
                .with_auth_lifecycle(hook.clone()),
        );
        let ai = Arc::new(
            Gateway::new(config.ai_base_url.clone(), session.clone()).with_auth_lifecycle(hook),
        );

        Ok(Self {
            config,
            session,
            api,
            ai,
            cache: QueryCache::new(),
            local_store: Arc::new(LocalStore::new()?),
        })
    }
}
