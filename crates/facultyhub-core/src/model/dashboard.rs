//! Personal dashboard statistics and scholar-sync results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which column of a scholar metric row to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    /// Lifetime value (`all`)
    All,
    /// Value since the given year (`since_<year>`)
    Since(i32),
}

impl StatKind {
    fn column(&self) -> String {
        match self {
            Self::All => "all".to_string(),
            Self::Since(year) => format!("since_{year}"),
        }
    }
}

/// Bibliometric table imported from the scholar profile.
///
/// `table` rows look like `{"citations": {"all": 120, "since_2020": 80}}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScholarStats {
    #[serde(default)]
    pub table: Vec<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub graph: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScholarStats {
    /// Looks up a metric (e.g. `citations`, `h_index`, `i10_index`); 0 when absent.
    pub fn metric(&self, key: &str, kind: StatKind) -> u64 {
        self.table
            .iter()
            .find_map(|row| row.get(key))
            .and_then(|cell| cell.get(kind.column()))
            .and_then(|v| v.as_u64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub papers_count: u64,
    /// Scholar profile bio (name, affiliations, interests, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_bio: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_stats: Option<ScholarStats>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DashboardStats {
    pub fn has_scholar_data(&self) -> bool {
        self.user_bio.as_ref().is_some_and(|bio| !bio.is_empty())
    }

    pub fn external_stat(&self, key: &str, kind: StatKind) -> u64 {
        self.user_stats
            .as_ref()
            .map(|stats| stats.metric(key, kind))
            .unwrap_or(0)
    }

    /// Folds a fresh sync result into the dashboard so the view updates
    /// without another round trip.
    pub fn merge_sync(&mut self, result: ScholarSyncResult) {
        self.user_bio = result.author;
        self.user_stats = result.stats;
        self.papers_count = result.paper_count;
    }
}

/// Payload returned by the scholar import endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarSyncResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<ScholarStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Map<String, Value>>,
    #[serde(default)]
    pub paper_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stats() -> ScholarStats {
        serde_json::from_value(json!({
            "table": [
                { "citations": { "all": 120, "since_2020": 80 } },
                { "h_index": { "all": "7", "since_2020": 5 } }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_metric_lookup() {
        let stats = stats();
        assert_eq!(stats.metric("citations", StatKind::All), 120);
        assert_eq!(stats.metric("citations", StatKind::Since(2020)), 80);
        assert_eq!(stats.metric("h_index", StatKind::All), 7);
        assert_eq!(stats.metric("i10_index", StatKind::All), 0);
    }

    #[test]
    fn test_merge_sync() {
        let mut dashboard = DashboardStats::default();
        assert!(!dashboard.has_scholar_data());
        assert_eq!(dashboard.external_stat("citations", StatKind::All), 0);

        let mut author = Map::new();
        author.insert("name".into(), json!("Asha Rao"));
        dashboard.merge_sync(ScholarSyncResult {
            stats: Some(stats()),
            author: Some(author),
            paper_count: 42,
        });

        assert!(dashboard.has_scholar_data());
        assert_eq!(dashboard.papers_count, 42);
        assert_eq!(dashboard.external_stat("citations", StatKind::All), 120);
    }
}
