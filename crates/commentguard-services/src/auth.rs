//! Authentication service: login, signup, logout.
//!
//! A successful login feeds the session store, which every gateway reads
//! on subsequent calls.

use crate::gateway::Gateway;
use commentguard_core::error::Result;
use commentguard_core::session::{Identity, Role, SessionStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignupRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Identity and token returned by a successful login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub role: Role,
}

/// Service for the `/auth` endpoints of the primary origin.
pub struct AuthService {
    gateway: Arc<Gateway>,
    session: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(gateway: Arc<Gateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// Logs in and activates the returned session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let response: LoginResponse = self
            .gateway
            .post("/auth/login", &LoginRequest { email, password })
            .await?;

        self.session.set_auth(
            Identity {
                user_id: response.user_id,
                email: response.email.clone(),
                username: response.username.clone(),
                role: response.role,
            },
            response.token.clone(),
        )?;

        Ok(response)
    }

    /// Registers a new account. Does not log in.
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> Result<()> {
        let _: serde_json::Value = self
            .gateway
            .post(
                "/auth/signup",
                &SignupRequest {
                    username,
                    email,
                    password,
                },
            )
            .await?;
        Ok(())
    }

    /// Ends the active session.
    pub fn logout(&self) -> Result<()> {
        self.session.logout()
    }
}
