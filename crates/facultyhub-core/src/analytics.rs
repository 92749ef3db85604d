//! Client-side aggregation over paper lists.

use crate::model::Paper;
use std::collections::BTreeMap;

/// Counts publications per year, ascending by year.
///
/// Papers without a parseable date are skipped.
pub fn yearly_counts(papers: &[Paper]) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for year in papers.iter().filter_map(Paper::published_year) {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts
}

/// Sorts papers by publication date, newest first. Undated papers go last,
/// keeping their relative order.
pub fn newest_first(mut papers: Vec<Paper>) -> Vec<Paper> {
    papers.sort_by(|a, b| b.published_on().cmp(&a.published_on()));
    papers
}

/// Total citations across a paper list.
pub fn total_citations(papers: &[Paper]) -> u64 {
    papers.iter().filter_map(|p| p.cited_by).sum()
}
