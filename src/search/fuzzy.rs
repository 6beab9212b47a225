//! Fuzzy matching over the demo catalog.

use crate::domain::CatalogItem;
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

/// A ranked fuzzy search result.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyResult {
    pub index: usize,
    pub score: i64,
}

/// Ranks catalog items using `fuzzy-matcher` (Skim algorithm).
///
/// Edge whitespace in the query is ignored; a blank query matches nothing.
pub fn rank_catalog(query: &str, items: &[CatalogItem]) -> Vec<FuzzyResult> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let matcher = SkimMatcherV2::default().smart_case();

    let mut results: Vec<FuzzyResult> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            matcher
                .fuzzy_match(&item.search_text(), trimmed)
                .map(|score| FuzzyResult { index, score })
        })
        .collect();

    results.sort_by_key(|result| std::cmp::Reverse(result.score));
    results
}
