use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle stage of a patent application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PatentStatus {
    #[default]
    Filed,
    Published,
    Granted,
    Rejected,
    /// Any status string this client does not know about.
    #[serde(untagged)]
    Other(String),
}

impl PatentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Filed => "Filed",
            Self::Published => "Published",
            Self::Granted => "Granted",
            Self::Rejected => "Rejected",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for PatentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patent {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    #[serde(default)]
    pub application_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filed_date: Option<String>,
    #[serde(default)]
    pub status: PatentStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Stored document location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_status_is_preserved() {
        let patent: Patent = serde_json::from_value(json!({
            "_id": "pt1",
            "title": "Sensor",
            "abstract": "A sensor",
            "status": "Under Examination"
        }))
        .unwrap();
        assert_eq!(patent.status, PatentStatus::Other("Under Examination".into()));
        assert_eq!(patent.abstract_text, "A sensor");

        let known: PatentStatus = serde_json::from_value(json!("Granted")).unwrap();
        assert_eq!(known, PatentStatus::Granted);
    }
}
