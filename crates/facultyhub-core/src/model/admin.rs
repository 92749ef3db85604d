//! Administrator analytics and faculty directory models.

use super::{Paper, Patent, Project};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One bar of the year-wise publication chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearCount {
    #[serde(default, alias = "_id")]
    pub year: Option<i32>,
    #[serde(default, alias = "papers", alias = "total")]
    pub count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub journal: u64,
    #[serde(default)]
    pub conference: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default)]
    pub yearwise_analytics: Vec<YearCount>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Faculty directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultySummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
}

/// Publication statistics for an arbitrary year range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeAnalytics {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub total_citations: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Everything an administrator sees about a single faculty member.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyDetail {
    #[serde(default)]
    pub journal_papers: Vec<Paper>,
    #[serde(default)]
    pub conference_papers: Vec<Paper>,
    #[serde(default)]
    pub book_chapter_papers: Vec<Paper>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub patents: Vec<Patent>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub journals: u64,
    #[serde(default)]
    pub conferences: u64,
    #[serde(default)]
    pub patents_count: u64,
    #[serde(default)]
    pub projects_count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FacultyDetail {
    /// All three paper categories merged, newest first.
    pub fn papers(&self) -> Vec<Paper> {
        let merged = self
            .journal_papers
            .iter()
            .chain(&self.conference_papers)
            .chain(&self.book_chapter_papers)
            .cloned()
            .collect();
        crate::analytics::newest_first(merged)
    }
}
