//! searchbar library crate: the search input widget plus its demo host.

pub mod app;
pub mod config;
pub mod domain;
pub mod fixtures;
#[cfg(feature = "harness")]
pub mod harness;
pub mod logging;
pub mod search;
pub mod ui;
pub mod widget;
