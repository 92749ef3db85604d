//! Request/response boundary to the backend.
//!
//! Resource clients build [`ApiRequest`] values and hand them to an
//! [`HttpGateway`]. Every gateway implementation guarantees the same
//! normalization: a non-2xx status comes back as `ClientError::Api`
//! carrying the body's `message` field when there is one, and a request
//! that never produced a response comes back as `ClientError::Transport`.

use async_trait::async_trait;
use facultyhub_core::workflow::FileUpload;
use facultyhub_core::{ClientError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, upload: FileUpload },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn file(name: impl Into<String>, upload: FileUpload) -> Self {
        Self::File {
            name: name.into(),
            upload,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

/// A backend request relative to the configured base address.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json_value(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Serializes `body` as the JSON payload.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| {
            ClientError::internal(format!("Failed to serialize request body: {}", e))
        })?;
        Ok(self.json_value(value))
    }

    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// JSON body field, if the body is a JSON object.
    pub fn json_field(&self, key: &str) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(value) => value.get(key),
            _ => None,
        }
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Names of the multipart fields, in order.
    pub fn form_field_names(&self) -> Vec<&str> {
        match &self.body {
            RequestBody::Multipart(parts) => parts.iter().map(FormPart::name).collect(),
            _ => Vec::new(),
        }
    }

    /// `METHOD /path`, for logs and error context.
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// A raw backend response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApiResponse {
    pub status: u16,
    /// Header names are stored lowercase.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// A JSON response in the backend's `{ statusCode, data, message }` envelope.
    pub fn envelope(status: u16, data: Value) -> Self {
        let body = serde_json::json!({
            "statusCode": status,
            "data": data,
            "success": (200..300).contains(&status),
        });
        Self::new(status, body.to_string()).with_header("content-type", "application/json")
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .push((name.into().to_ascii_lowercase(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `message` field of a JSON body, if any.
    pub fn message(&self) -> Option<String> {
        serde_json::from_slice::<Value>(&self.body)
            .ok()?
            .get("message")?
            .as_str()
            .map(str::to_string)
    }

    /// Converts a non-2xx response into `ClientError::Api`.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::api(self.status, self.message()))
        }
    }

    fn json_body(&self, endpoint: &str) -> Result<Value> {
        serde_json::from_slice(&self.body)
            .map_err(|e| ClientError::decode(endpoint, format!("body is not JSON: {}", e)))
    }

    /// Decodes the envelope's `data` field into `T`.
    ///
    /// A missing `data` field or a shape mismatch is a `Decode` error.
    pub fn data<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let mut body = self.json_body(endpoint)?;
        let data = body
            .get_mut("data")
            .map(Value::take)
            .ok_or_else(|| ClientError::decode(endpoint, "missing `data` field"))?;
        serde_json::from_value(data).map_err(|e| ClientError::decode(endpoint, e.to_string()))
    }

    /// Like [`data`](Self::data), but a missing or `null` payload decodes
    /// as `T::default()`.
    pub fn data_or_default<T: DeserializeOwned + Default>(&self, endpoint: &str) -> Result<T> {
        let mut body = self.json_body(endpoint)?;
        match body.get_mut("data").map(Value::take) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(data) => serde_json::from_value(data)
                .map_err(|e| ClientError::decode(endpoint, e.to_string())),
        }
    }
}

/// Transport seam between resource clients and the backend.
#[async_trait]
pub trait HttpGateway: Send + Sync {
    /// Sends one request. No retries, no caching.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_for_status_extracts_message() {
        let response = ApiResponse::new(409, json!({ "message": "User already exists" }).to_string());
        let err = response.error_for_status().unwrap_err();
        assert_eq!(err, ClientError::api(409, Some("User already exists".into())));

        let response = ApiResponse::new(502, "<html>Bad Gateway</html>");
        assert_eq!(response.error_for_status().unwrap_err(), ClientError::api(502, None));
    }

    #[test]
    fn test_data_shape_mismatch_is_decode_error() {
        let response = ApiResponse::envelope(200, json!({ "groups": "nope" }));

        #[derive(Debug, serde::Deserialize)]
        struct Groups {
            #[allow(dead_code)]
            groups: Vec<String>,
        }

        let err = response.data::<Groups>("GET /group/groups").unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }

    #[test]
    fn test_null_data_defaults() {
        let response = ApiResponse::envelope(200, Value::Null);
        let items: Vec<String> = response.data_or_default("GET /x").unwrap();
        assert!(items.is_empty());
        assert!(response.data::<Vec<String>>("GET /x").is_err());
    }

    #[test]
    fn test_request_builders() {
        let request = ApiRequest::patch("/group/removePaper")
            .query("groupId", "g1")
            .query("paperId", "p1");
        assert_eq!(request.describe(), "PATCH /group/removePaper");
        assert_eq!(request.query_value("paperId"), Some("p1"));
        assert_eq!(request.body, RequestBody::Empty);
    }
}
