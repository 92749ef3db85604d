use serde::{Deserialize, Serialize};

/// Columns to include in a generated publication report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOptions {
    pub title: bool,
    pub authors: bool,
    pub tag: bool,
    pub published_by: bool,
    pub published_date: bool,
    pub cited_by: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: true,
            authors: true,
            tag: false,
            published_by: true,
            published_date: true,
            cited_by: false,
        }
    }
}

impl ReportOptions {
    /// Flips a column by its wire name. Returns false for unknown names.
    pub fn toggle(&mut self, column: &str) -> bool {
        let slot = match column {
            "title" => &mut self.title,
            "authors" => &mut self.authors,
            "tag" => &mut self.tag,
            "publishedBy" => &mut self.published_by,
            "publishedDate" => &mut self.published_date,
            "citedBy" => &mut self.cited_by,
            _ => return false,
        };
        *slot = !*slot;
        true
    }

    pub fn any_selected(&self) -> bool {
        self.title
            || self.authors
            || self.tag
            || self.published_by
            || self.published_date
            || self.cited_by
    }
}

/// Binary report returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub content_type: Option<String>,
    pub file_name: String,
    pub bytes: Vec<u8>,
}
