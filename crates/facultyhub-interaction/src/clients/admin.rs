use crate::gateway::{ApiRequest, HttpGateway};
use facultyhub_core::Result;
use facultyhub_core::model::{AdminDashboardStats, FacultyDetail, FacultySummary, RangeAnalytics};
use serde_json::json;
use std::sync::Arc;

/// Administrator analytics and faculty directory.
#[derive(Clone)]
pub struct AdminClient {
    gateway: Arc<dyn HttpGateway>,
}

impl AdminClient {
    pub fn new(gateway: Arc<dyn HttpGateway>) -> Self {
        Self { gateway }
    }

    pub async fn dashboard(&self) -> Result<AdminDashboardStats> {
        self.gateway
            .send(ApiRequest::get("/admin/dashboard"))
            .await?
            .data_or_default("GET /admin/dashboard")
    }

    pub async fn faculty(&self) -> Result<Vec<FacultySummary>> {
        self.gateway
            .send(ApiRequest::get("/admin/getAllUsers"))
            .await?
            .data_or_default("GET /admin/getAllUsers")
    }

    /// Publication analytics between two years, inclusive.
    pub async fn range_analytics(&self, from: &str, to: &str) -> Result<RangeAnalytics> {
        let request = ApiRequest::post("/admin/fromTo")
            .json_value(json!({ "data": { "from": from, "to": to } }));
        self.gateway
            .send(request)
            .await?
            .data_or_default("POST /admin/fromTo")
    }

    pub async fn faculty_detail(&self, user_id: &str) -> Result<FacultyDetail> {
        self.gateway
            .send(ApiRequest::get(format!("/admin/user/{user_id}")))
            .await?
            .data("GET /admin/user/{id}")
    }
}
