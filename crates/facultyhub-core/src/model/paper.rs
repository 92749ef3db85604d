use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A publication, either imported from a scholar profile or uploaded manually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_by: Option<String>,
    /// Raw date as sent by the backend (ISO timestamp, date or bare year).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cited_by: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Paper {
    /// Minimal paper with only an id, mostly useful for membership lists.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            authors: None,
            published_by: None,
            published_date: None,
            cited_by: None,
            tag: None,
            extra: Map::new(),
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn published(mut self, date: impl Into<String>) -> Self {
        self.published_date = Some(date.into());
        self
    }

    /// Parses `published_date`, accepting RFC 3339, `YYYY-MM-DD`, `YYYY/MM/DD` or `YYYY`.
    pub fn published_on(&self) -> Option<NaiveDate> {
        let raw = self.published_date.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.date_naive());
        }
        for format in ["%Y-%m-%d", "%Y/%m/%d"] {
            if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
                return Some(date);
            }
        }
        // "2021-03-04T00:00:00.000Z" without offset, or anything with a leading date
        if let Some(prefix) = raw.get(..10) {
            if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
                return Some(date);
            }
        }
        raw.parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
    }

    pub fn published_year(&self) -> Option<i32> {
        self.published_on().map(|d| d.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_published_on_formats() {
        let p = Paper::with_id("p").published("2021-06-15T10:00:00.000Z");
        assert_eq!(p.published_year(), Some(2021));

        let p = Paper::with_id("p").published("2019/02/01");
        assert_eq!(p.published_on(), NaiveDate::from_ymd_opt(2019, 2, 1));

        let p = Paper::with_id("p").published("2018");
        assert_eq!(p.published_year(), Some(2018));

        let p = Paper::with_id("p").published("sometime");
        assert_eq!(p.published_on(), None);
    }
}
