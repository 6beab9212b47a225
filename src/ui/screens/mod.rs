//! Screen renderers.

pub mod demo;
