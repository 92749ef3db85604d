use crate::gateway::{ApiRequest, HttpGateway};
use facultyhub_core::Result;
use facultyhub_core::model::Group;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
struct GroupList {
    #[serde(default)]
    groups: Vec<Group>,
}

/// Collections ("groups") of papers.
#[derive(Clone)]
pub struct GroupClient {
    gateway: Arc<dyn HttpGateway>,
}

impl GroupClient {
    pub fn new(gateway: Arc<dyn HttpGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Group>> {
        let list: GroupList = self
            .gateway
            .send(ApiRequest::get("/group/groups"))
            .await?
            .data_or_default("GET /group/groups")?;
        Ok(list.groups)
    }

    /// Group detail including its papers.
    pub async fn get(&self, group_id: &str) -> Result<Group> {
        self.gateway
            .send(ApiRequest::get(format!("/group/groups/{group_id}")))
            .await?
            .data("GET /group/groups/{id}")
    }

    pub async fn create(&self, name: &str, description: &str) -> Result<Group> {
        let request = ApiRequest::post("/group/createGroup")
            .json_value(json!({ "name": name, "description": description }));
        self.gateway
            .send(request)
            .await?
            .data("POST /group/createGroup")
    }

    /// Creates a group holding every paper carrying `tag`.
    pub async fn create_by_tag(&self, tag: &str) -> Result<Group> {
        let request = ApiRequest::post("/group/groupByTag").json_value(json!({ "tag": tag }));
        self.gateway
            .send(request)
            .await?
            .data("POST /group/groupByTag")
    }

    pub async fn delete(&self, group_id: &str) -> Result<()> {
        self.gateway
            .send(ApiRequest::delete(format!("/group/deleteGroup/{group_id}")))
            .await?;
        Ok(())
    }

    // Membership endpoints take query parameters only.

    pub async fn add_paper(&self, group_id: &str, paper_id: &str) -> Result<()> {
        let request = ApiRequest::patch("/group/addPaper")
            .query("groupId", group_id)
            .query("paperId", paper_id);
        self.gateway.send(request).await?;
        Ok(())
    }

    pub async fn remove_paper(&self, group_id: &str, paper_id: &str) -> Result<()> {
        let request = ApiRequest::patch("/group/removePaper")
            .query("groupId", group_id)
            .query("paperId", paper_id);
        self.gateway.send(request).await?;
        Ok(())
    }
}
