//! CLI helpers for tilegraph

pub mod attrs;
pub mod commands;

pub use attrs::EdgeAttributes;
