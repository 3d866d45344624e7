//! Admin user-management service: suspend, flag and list accounts.

use crate::gateway::Gateway;
use commentguard_core::error::{CommentGuardError, Result};
use commentguard_core::moderation::AdminUser;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct SuspendRequest<'a> {
    reason: &'a str,
    days: u32,
}

#[derive(Debug, Serialize)]
struct FlagRequest<'a> {
    reason: &'a str,
}

/// Service for the `/admin/users` endpoints of the primary origin.
pub struct AdminService {
    gateway: Arc<Gateway>,
}

impl AdminService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn list_users(&self) -> Result<Vec<AdminUser>> {
        self.gateway.get("/admin/users").await
    }

    /// Suspends a user for the given number of days.
    ///
    /// Admin accounts are rejected here before any network call is
    /// issued. This mirrors the dashboard's disabled button and is a UX
    /// guard only; the server is assumed to enforce the same rule
    /// authoritatively.
    pub async fn suspend(&self, user: &AdminUser, reason: &str, days: u32) -> Result<AdminUser> {
        if user.is_admin() {
            return Err(CommentGuardError::invalid_input(
                "admin accounts cannot be suspended",
            ));
        }
        self.gateway
            .post(
                &format!("/admin/users/{}/suspend", user.user_id),
                &SuspendRequest { reason, days },
            )
            .await
    }

    pub async fn unsuspend(&self, user_id: i64) -> Result<()> {
        let _: Value = self
            .gateway
            .post_empty(&format!("/admin/users/{user_id}/unsuspend"))
            .await?;
        Ok(())
    }

    pub async fn flag(&self, user_id: i64, reason: &str) -> Result<()> {
        let _: Value = self
            .gateway
            .post(
                &format!("/admin/users/{user_id}/flag"),
                &FlagRequest { reason },
            )
            .await?;
        Ok(())
    }

    pub async fn unflag(&self, user_id: i64) -> Result<()> {
        let _: Value = self
            .gateway
            .post_empty(&format!("/admin/users/{user_id}/unflag"))
            .await?;
        Ok(())
    }
}
