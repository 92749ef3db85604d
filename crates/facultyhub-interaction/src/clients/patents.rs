use crate::gateway::{ApiRequest, FormPart, HttpGateway};
use facultyhub_core::Result;
use facultyhub_core::model::{Patent, PatentStatus, join_list};
use facultyhub_core::workflow::FileUpload;
use serde::Serialize;
use std::sync::Arc;

/// Editable fields of a patent, as sent on create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatentPayload {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub application_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filed_date: Option<String>,
    pub status: PatentStatus,
    #[serde(serialize_with = "super::comma_joined")]
    pub tags: Vec<String>,
}

impl PatentPayload {
    /// Multipart fields for the create endpoint; tags are comma-joined.
    fn form_parts(&self, pdf: FileUpload) -> Vec<FormPart> {
        let mut parts = vec![
            FormPart::text("title", &self.title),
            FormPart::text("abstract", &self.abstract_text),
            FormPart::text("applicationNumber", &self.application_number),
            FormPart::text("status", self.status.as_str()),
            FormPart::text("tags", join_list(&self.tags)),
        ];
        if let Some(date) = &self.filed_date {
            parts.push(FormPart::text("filedDate", date));
        }
        parts.push(FormPart::file("pdf", pdf));
        parts
    }
}

#[derive(Clone)]
pub struct PatentClient {
    gateway: Arc<dyn HttpGateway>,
}

impl PatentClient {
    pub fn new(gateway: Arc<dyn HttpGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Patent>> {
        self.gateway
            .send(ApiRequest::get("/patents/getUserPatents"))
            .await?
            .data_or_default("GET /patents/getUserPatents")
    }

    pub async fn get(&self, patent_id: &str) -> Result<Patent> {
        self.gateway
            .send(ApiRequest::get(format!("/patents/getPatentById/{patent_id}")))
            .await?
            .data("GET /patents/getPatentById/{id}")
    }

    /// Creates a patent. The document travels as the `pdf` form field.
    pub async fn create(&self, payload: &PatentPayload, pdf: FileUpload) -> Result<Patent> {
        let request = ApiRequest::post("/patents/uploadPatent").multipart(payload.form_parts(pdf));
        self.gateway
            .send(request)
            .await?
            .data("POST /patents/uploadPatent")
    }

    pub async fn update(&self, patent_id: &str, payload: &PatentPayload) -> Result<Patent> {
        let request = ApiRequest::put(format!("/patents/updatePatent/{patent_id}")).json(payload)?;
        self.gateway
            .send(request)
            .await?
            .data("PUT /patents/updatePatent/{id}")
    }

    pub async fn delete(&self, patent_id: &str) -> Result<()> {
        self.gateway
            .send(ApiRequest::delete(format!("/patents/deletePatent/{patent_id}")))
            .await?;
        Ok(())
    }
}
