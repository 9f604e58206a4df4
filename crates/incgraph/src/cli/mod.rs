//! CLI command implementations.

mod display;

pub mod annotate;
pub mod extract;
pub mod stats;
