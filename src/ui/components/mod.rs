//! Reusable UI components.

pub mod footer;
pub mod header;
pub mod search_bar;
