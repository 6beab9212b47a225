//! Deterministic fixture data for the demo host and harness rendering.

use crate::domain::{CatalogItem, CatalogKind};

/// Values the demo host pushes into the search bar props, in rotation.
pub const PRESET_VALUES: [&str; 4] = ["ratatui", "  async runtime ", "", "serde"];

/// Returns the fixture catalog searched by the demo host.
pub fn demo_catalog() -> Vec<CatalogItem> {
    [
        ("ratatui", CatalogKind::Crate, "terminal user interface widgets"),
        ("crossterm", CatalogKind::Crate, "cross-platform terminal events"),
        ("tokio", CatalogKind::Crate, "async runtime with networking"),
        ("serde", CatalogKind::Crate, "serialization framework"),
        ("clap", CatalogKind::Crate, "command line argument parsing"),
        ("anyhow", CatalogKind::Crate, "application error context"),
        ("thiserror", CatalogKind::Crate, "derive error enums"),
        ("fuzzy-matcher", CatalogKind::Crate, "skim style fuzzy matching"),
        ("ripgrep", CatalogKind::Tool, "recursive regex search"),
        ("fd", CatalogKind::Tool, "fast file finder"),
        ("bat", CatalogKind::Tool, "cat with syntax highlighting"),
        ("rustlings", CatalogKind::Guide, "small exercises for learning"),
        ("async book", CatalogKind::Guide, "asynchronous programming in depth"),
        ("nomicon", CatalogKind::Guide, "unsafe code and raw pointers"),
    ]
    .into_iter()
    .map(|(name, kind, summary)| CatalogItem {
        name: name.to_owned(),
        kind,
        summary: summary.to_owned(),
    })
    .collect()
}
