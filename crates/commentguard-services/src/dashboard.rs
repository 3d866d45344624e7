//! Dashboard service: the polled system-overview statistics.

use crate::gateway::Gateway;
use commentguard_core::dashboard::DashboardStats;
use commentguard_core::error::Result;
use std::sync::Arc;

/// Service for the `/dashboard` endpoint of the primary origin.
pub struct DashboardService {
    gateway: Arc<Gateway>,
}

impl DashboardService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Current aggregate statistics. The query layer refetches this on a
    /// fixed interval while the overview is on screen.
    pub async fn stats(&self) -> Result<DashboardStats> {
        self.gateway.get("/dashboard/stats").await
    }
}
