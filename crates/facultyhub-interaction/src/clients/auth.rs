use crate::gateway::{ApiRequest, FormPart, HttpGateway};
use async_trait::async_trait;
use facultyhub_core::model::User;
use facultyhub_core::session::SessionTerminator;
use facultyhub_core::{ClientError, Result};
use serde_json::{Value, json};
use std::sync::Arc;

/// Registration, login and logout.
#[derive(Clone)]
pub struct AuthClient {
    gateway: Arc<dyn HttpGateway>,
}

impl AuthClient {
    pub fn new(gateway: Arc<dyn HttpGateway>) -> Self {
        Self { gateway }
    }

    /// `POST /users/register` with the full signup form.
    pub async fn register(&self, form: Vec<FormPart>) -> Result<Value> {
        let endpoint = "POST /users/register";
        let response = self
            .gateway
            .send(ApiRequest::post("/users/register").multipart(form))
            .await?;
        response.data_or_default(endpoint)
    }

    /// `POST /users/login`; the identity is `data.user`.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let endpoint = "POST /users/login";
        let request = ApiRequest::post("/users/login")
            .json_value(json!({ "email": email, "password": password }));
        let data: Value = self.gateway.send(request).await?.data(endpoint)?;
        let user = data
            .get("user")
            .cloned()
            .ok_or_else(|| ClientError::decode(endpoint, "missing `data.user`"))?;
        serde_json::from_value(user).map_err(|e| ClientError::decode(endpoint, e.to_string()))
    }

    /// `POST /users/googleLogin`.
    ///
    /// The backend has answered both `{ data: { user } }` and a bare
    /// `{ data: user }`; both decode to the same identity.
    pub async fn google_login(&self, id_token: &str) -> Result<User> {
        let endpoint = "POST /users/googleLogin";
        let request = ApiRequest::post("/users/googleLogin").json_value(json!({
            "idToken_name": id_token,
            "idToken_email": id_token,
        }));
        let data: Value = self.gateway.send(request).await?.data(endpoint)?;
        let identity = match data.get("user") {
            Some(user) if user.is_object() => user.clone(),
            _ => data,
        };
        serde_json::from_value(identity).map_err(|e| ClientError::decode(endpoint, e.to_string()))
    }

    /// `POST /users/logout`; clears the backend's session cookies.
    pub async fn logout(&self) -> Result<()> {
        self.gateway.send(ApiRequest::post("/users/logout")).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionTerminator for AuthClient {
    async fn terminate(&self) -> Result<()> {
        self.logout().await
    }
}
