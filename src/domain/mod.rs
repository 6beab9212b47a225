//! Domain models shared by the demo host's search, state and UI layers.

use std::fmt;

/// One searchable entry in the demo catalog.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CatalogItem {
    pub name: String,
    pub kind: CatalogKind,
    pub summary: String,
}

impl CatalogItem {
    /// Returns a searchable composite string used by fuzzy matching.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.kind, self.summary)
    }

    /// Returns a compact UI label.
    pub fn display_line(&self) -> String {
        format!("{} [{}]", self.name, self.kind)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CatalogKind {
    Crate,
    Tool,
    Guide,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Crate => "crate",
            Self::Tool => "tool",
            Self::Guide => "guide",
        };
        f.write_str(label)
    }
}
