use crate::gateway::{ApiRequest, FormPart, HttpGateway};
use facultyhub_core::Result;
use facultyhub_core::model::User;
use facultyhub_core::workflow::FileUpload;
use serde::Serialize;
use std::sync::Arc;

/// Payload of `PATCH /users/updateDetails`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_email: Option<String>,
}

/// Payload of the change/set password endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub original_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// The logged-in user's own account.
#[derive(Clone)]
pub struct UserClient {
    gateway: Arc<dyn HttpGateway>,
}

impl UserClient {
    pub fn new(gateway: Arc<dyn HttpGateway>) -> Self {
        Self { gateway }
    }

    pub async fn current(&self) -> Result<User> {
        self.gateway
            .send(ApiRequest::get("/users/getUser"))
            .await?
            .data("GET /users/getUser")
    }

    /// Returns the updated identity.
    pub async fn update_details(&self, update: &ProfileUpdate) -> Result<User> {
        self.gateway
            .send(ApiRequest::patch("/users/updateDetails").json(update)?)
            .await?
            .data("PATCH /users/updateDetails")
    }

    pub async fn update_avatar(&self, avatar: FileUpload) -> Result<User> {
        self.gateway
            .send(ApiRequest::patch("/users/updateAvatar").multipart(vec![FormPart::file("avatar", avatar)]))
            .await?
            .data("PATCH /users/updateAvatar")
    }

    pub async fn update_cover_image(&self, cover: FileUpload) -> Result<User> {
        self.gateway
            .send(
                ApiRequest::patch("/users/updateCoverImage")
                    .multipart(vec![FormPart::file("coverImage", cover)]),
            )
            .await?
            .data("PATCH /users/updateCoverImage")
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        self.gateway
            .send(ApiRequest::patch("/users/changePassword").json(change)?)
            .await?;
        Ok(())
    }

    /// First password for accounts created through Google login.
    pub async fn set_password(&self, change: &PasswordChange) -> Result<()> {
        self.gateway
            .send(ApiRequest::post("/users/setPassword").json(change)?)
            .await?;
        Ok(())
    }

    /// `POST /users/completeProfile` (department, designation, images, ...).
    pub async fn complete_profile(&self, form: Vec<FormPart>) -> Result<User> {
        self.gateway
            .send(ApiRequest::post("/users/completeProfile").multipart(form))
            .await?
            .data("POST /users/completeProfile")
    }

    pub async fn delete_account(&self) -> Result<()> {
        self.gateway.send(ApiRequest::delete("/users/delete")).await?;
        Ok(())
    }
}
