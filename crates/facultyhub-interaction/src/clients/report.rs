use crate::gateway::{ApiRequest, HttpGateway};
use facultyhub_core::Result;
use facultyhub_core::model::{ReportDocument, ReportOptions};
use std::sync::Arc;

#[derive(Clone)]
pub struct ReportClient {
    gateway: Arc<dyn HttpGateway>,
}

impl ReportClient {
    pub fn new(gateway: Arc<dyn HttpGateway>) -> Self {
        Self { gateway }
    }

    /// `POST /users/report`; the response body is the document itself.
    pub async fn generate(&self, options: &ReportOptions) -> Result<ReportDocument> {
        let response = self
            .gateway
            .send(ApiRequest::post("/users/report").json(options)?)
            .await?;

        let file_name = response
            .header("content-disposition")
            .and_then(disposition_file_name)
            .unwrap_or_else(default_file_name);
        Ok(ReportDocument {
            content_type: response.header("content-type").map(str::to_string),
            file_name,
            bytes: response.body,
        })
    }
}

fn disposition_file_name(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

fn default_file_name() -> String {
    format!(
        "Research_Report_{}.docx",
        chrono::Local::now().format("%Y-%m-%d")
    )
}
