//! `reqwest`-backed gateway.

use crate::gateway::{ApiRequest, ApiResponse, FormPart, HttpGateway, Method, RequestBody};
use async_trait::async_trait;
use facultyhub_core::config::ClientConfig;
use facultyhub_core::{ClientError, Result};
use reqwest::Client;
use reqwest::multipart::{Form, Part};

/// Gateway that talks HTTP to the configured base address.
///
/// The backend session lives in cookies, so the client keeps a cookie jar
/// for its whole lifetime. No request timeout is applied.
#[derive(Clone)]
pub struct ReqwestGateway {
    client: Client,
    config: ClientConfig,
}

impl ReqwestGateway {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    fn form(parts: Vec<FormPart>) -> Result<Form> {
        let mut form = Form::new();
        for part in parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File { name, upload } => {
                    let mime = upload.content_type.clone().unwrap_or_else(|| {
                        mime_guess::from_path(&upload.file_name)
                            .first_or_octet_stream()
                            .essence_str()
                            .to_string()
                    });
                    let file = Part::bytes(upload.bytes)
                        .file_name(upload.file_name)
                        .mime_str(&mime)
                        .map_err(|e| {
                            ClientError::validation(format!("Invalid content type {}: {}", mime, e))
                        })?;
                    form.part(name, file)
                }
            };
        }
        Ok(form)
    }
}

#[async_trait]
impl HttpGateway for ReqwestGateway {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let endpoint = request.describe();
        let url = self.config.endpoint(&request.path);
        tracing::debug!(endpoint = %endpoint, "Sending request");

        let mut builder = self
            .client
            .request(Self::method(request.method), &url)
            .query(&request.query);
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => builder.multipart(Self::form(parts)?),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(endpoint = %endpoint, error = %e, "Request failed before a response");
            ClientError::transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::transport(format!("Failed to read response body: {}", e)))?
            .to_vec();
        log::trace!("{} -> {} ({} bytes)", endpoint, status, body.len());

        let response = ApiResponse {
            status,
            headers,
            body,
        };
        if !response.is_success() {
            tracing::warn!(endpoint = %endpoint, status, "Backend returned an error status");
        }
        response.error_for_status()
    }
}
