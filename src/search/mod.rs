//! Search helpers used by the demo host.

pub mod fuzzy;
