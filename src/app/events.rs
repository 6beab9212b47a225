//! Messages flowing into the UI event loop, and the background search task.

use crate::domain::CatalogItem;
use crate::search::fuzzy::rank_catalog;
use crate::widget::FocusEvent;
use crossterm::event::KeyEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Message drained by the UI event loop every tick.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A notification the search bar sent through one of its callbacks.
    Widget(WidgetNotification),
    SearchCompleted {
        query: String,
        results: Vec<usize>,
    },
}

/// One callback invocation made by the search bar.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum WidgetNotification {
    Changed(String),
    Focused(FocusEvent),
    Blurred(FocusEvent),
    KeyUp(KeyEvent),
    SearchRequested(String),
    SearchCancelled,
}

impl WidgetNotification {
    /// Callback name and argument as shown in the actions log.
    pub fn describe(&self) -> (&'static str, String) {
        match self {
            Self::Changed(text) => ("onChange", format!("{text:?}")),
            Self::Focused(event) => ("onFocus", format!("value={:?}", event.value)),
            Self::Blurred(event) => ("onBlur", format!("value={:?}", event.value)),
            Self::KeyUp(key) => ("onKeyUp", format!("{:?}", key.code)),
            Self::SearchRequested(text) => ("onRequestSearch", format!("{text:?}")),
            Self::SearchCancelled => ("onCancelSearch", String::new()),
        }
    }
}

/// How the host answers search requests.
#[derive(Debug, Clone, Copy)]
pub enum SearchDispatch {
    /// Rank on the spot; used by the harness, which runs without a runtime.
    Inline,
    /// Rank in a spawned task after `delay`.
    Background { delay: Duration },
}

/// Runs a catalog search and reports the ranked indices back to the event loop.
pub fn dispatch_search(
    dispatch: SearchDispatch,
    tx: UnboundedSender<AppMessage>,
    catalog: Arc<[CatalogItem]>,
    query: String,
) {
    match dispatch {
        SearchDispatch::Inline => {
            let results = ranked_indices(&query, &catalog);
            let _ = tx.send(AppMessage::SearchCompleted { query, results });
        }
        SearchDispatch::Background { delay } => {
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let results = ranked_indices(&query, &catalog);
                let _ = tx.send(AppMessage::SearchCompleted { query, results });
            });
        }
    }
}

fn ranked_indices(query: &str, catalog: &[CatalogItem]) -> Vec<usize> {
    rank_catalog(query, catalog)
        .into_iter()
        .map(|result| result.index)
        .collect()
}
