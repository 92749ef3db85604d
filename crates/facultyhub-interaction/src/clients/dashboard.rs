use crate::gateway::{ApiRequest, HttpGateway};
use facultyhub_core::Result;
use facultyhub_core::model::DashboardStats;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardClient {
    gateway: Arc<dyn HttpGateway>,
}

impl DashboardClient {
    pub fn new(gateway: Arc<dyn HttpGateway>) -> Self {
        Self { gateway }
    }

    /// Paper count plus the imported scholar bio and metric table.
    pub async fn stats(&self) -> Result<DashboardStats> {
        self.gateway
            .send(ApiRequest::get("/dashboard/userStats"))
            .await?
            .data_or_default("GET /dashboard/userStats")
    }
}
