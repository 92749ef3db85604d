use super::Paper;
use serde::{Deserialize, Serialize};

/// A collection ("folder") of papers.
///
/// The list endpoint may omit `papers`; the detail endpoint always fills it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default)]
    pub papers: Vec<Paper>,
}

impl Group {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            tag: None,
            papers: Vec::new(),
        }
    }

    pub fn with_papers(mut self, papers: Vec<Paper>) -> Self {
        self.papers = papers;
        self
    }

    pub fn contains_paper(&self, paper_id: &str) -> bool {
        self.papers.iter().any(|p| p.id == paper_id)
    }
}
