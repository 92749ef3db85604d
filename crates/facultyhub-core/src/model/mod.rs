//! Domain models decoded from backend responses.
//!
//! Each type is the stable, typed shape the rest of the client works
//! against. Fields the client never reads are kept in an `extra` map so
//! they survive a round trip untouched.
//!
//! # Module Structure
//!
//! - `user`: identity projection held by the session
//! - `paper`: publications and date handling
//! - `group`: collections of papers
//! - `patent`, `project`: researcher records
//! - `dashboard`, `admin`: aggregate views
//! - `report`: report generation options and document payload

mod admin;
mod dashboard;
mod group;
mod paper;
mod patent;
mod project;
mod report;
mod user;

pub use admin::{AdminDashboardStats, FacultyDetail, FacultySummary, RangeAnalytics, YearCount};
pub use dashboard::{DashboardStats, ScholarStats, ScholarSyncResult, StatKind};
pub use group::Group;
pub use paper::Paper;
pub use patent::{Patent, PatentStatus};
pub use project::{Attachment, Project, ProjectNote};
pub use report::{ReportDocument, ReportOptions};
pub use user::User;

/// Splits a comma-separated form value into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins list entries back into the comma-separated form representation.
pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}
