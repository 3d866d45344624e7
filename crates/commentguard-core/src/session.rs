//! Authenticated session domain model and store.
//!
//! The session store is the only cross-cutting mutable state in the
//! client: every gateway call reads the token, and writes happen only on
//! discrete login/logout events.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use strum_macros::{Display, EnumString};

/// Role assigned to an account by the server.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Identity fields returned by a successful login, without the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i64,
    pub email: String,
    pub username: String,
    pub role: Role,
}

/// The current authenticated session.
///
/// Created on successful login, persisted across restarts, destroyed on
/// logout or when the server rejects the token. There is never more than
/// one active session per client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub email: String,
    pub username: String,
    pub role: Role,
    /// Opaque bearer token. Attached to every gateway request.
    pub token: String,
}

impl Session {
    pub fn new(identity: Identity, token: impl Into<String>) -> Self {
        Self {
            user_id: identity.user_id,
            email: identity.email,
            username: identity.username,
            role: identity.role,
            token: token.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Durable persistence for the session, so a restart keeps the user
/// logged in.
///
/// Implementations must never log the token.
pub trait SessionPersistence: Send + Sync {
    /// Persists the session, replacing any previously stored one.
    fn save(&self, session: &Session) -> Result<()>;

    /// Loads the previously persisted session, if any.
    fn load(&self) -> Result<Option<Session>>;

    /// Removes the persisted session.
    fn clear(&self) -> Result<()>;
}

/// Hook invoked when the server rejects the bearer token.
///
/// The view layer uses this to redirect to the login screen. The session
/// has already been cleared when the hook fires.
pub trait AuthLifecycle: Send + Sync {
    fn on_auth_expired(&self);
}

/// Process-wide holder of the current [`Session`].
///
/// Controlled mutation entry points only: [`SessionStore::set_auth`] and
/// [`SessionStore::logout`]. Reads are synchronous so the gateway can
/// attach the token without awaiting.
pub struct SessionStore {
    current: RwLock<Option<Session>>,
    persistence: Arc<dyn SessionPersistence>,
}

impl SessionStore {
    /// Creates an empty store backed by the given persistence.
    pub fn new(persistence: Arc<dyn SessionPersistence>) -> Self {
        Self {
            current: RwLock::new(None),
            persistence,
        }
    }

    /// Restores a previously persisted session into memory.
    ///
    /// Call once at startup. A missing persisted session is not an error.
    pub fn restore(&self) -> Result<bool> {
        let restored = self.persistence.load()?;
        let found = restored.is_some();
        let mut guard = self.current.write().expect("session lock poisoned");
        *guard = restored;
        Ok(found)
    }

    /// Stores a new identity and token, replacing any active session, and
    /// persists it. All gateways observe the new token on their next call.
    pub fn set_auth(&self, identity: Identity, token: impl Into<String>) -> Result<()> {
        let session = Session::new(identity, token);
        self.persistence.save(&session)?;
        let mut guard = self.current.write().expect("session lock poisoned");
        *guard = Some(session);
        Ok(())
    }

    /// Clears the session from memory and durable storage. Subsequent
    /// gateway calls carry no Authorization header.
    pub fn logout(&self) -> Result<()> {
        self.persistence.clear()?;
        let mut guard = self.current.write().expect("session lock poisoned");
        *guard = None;
        Ok(())
    }

    /// Synchronous token read used by the gateway request path.
    pub fn token(&self) -> Option<String> {
        let guard = self.current.read().expect("session lock poisoned");
        guard.as_ref().map(|s| s.token.clone())
    }

    /// Returns a copy of the current session, if any.
    pub fn current(&self) -> Option<Session> {
        let guard = self.current.read().expect("session lock poisoned");
        guard.clone()
    }

    /// True when a session is active.
    pub fn is_authenticated(&self) -> bool {
        let guard = self.current.read().expect("session lock poisoned");
        guard.is_some()
    }
}
