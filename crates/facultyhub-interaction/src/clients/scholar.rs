use crate::gateway::{ApiRequest, HttpGateway};
use facultyhub_core::Result;
use facultyhub_core::model::ScholarSyncResult;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorIdData {
    #[serde(default)]
    author_id: Option<String>,
}

/// Scholar-profile import.
///
/// Both endpoints are GETs whose handlers read the request body, so the
/// argument is sent as a JSON body and repeated as a query parameter.
#[derive(Clone)]
pub struct ScholarClient {
    gateway: Arc<dyn HttpGateway>,
}

impl ScholarClient {
    pub fn new(gateway: Arc<dyn HttpGateway>) -> Self {
        Self { gateway }
    }

    /// Extracts the author identifier from a profile URL.
    ///
    /// `Ok(None)` means the backend answered but found no identifier.
    pub async fn resolve_author_id(&self, profile_url: &str) -> Result<Option<String>> {
        let request = ApiRequest::get("/users/getAuthorID")
            .query("url", profile_url)
            .json_value(json!({ "url": profile_url }));
        let data: AuthorIdData = self
            .gateway
            .send(request)
            .await?
            .data_or_default("GET /users/getAuthorID")?;
        Ok(data.author_id.filter(|id| !id.trim().is_empty()))
    }

    /// Scrapes the profile, stores its papers and returns the fresh stats.
    /// Typically slow.
    pub async fn import(&self, author_id: &str) -> Result<ScholarSyncResult> {
        let request = ApiRequest::get("/users/authorProfile")
            .query("authorId", author_id)
            .json_value(json!({ "authorId": author_id }));
        self.gateway
            .send(request)
            .await?
            .data_or_default("GET /users/authorProfile")
    }
}
