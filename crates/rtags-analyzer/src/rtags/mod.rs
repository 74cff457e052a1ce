//! rtags backend: runs `rc` and turns its text output into structured results.

mod client;
pub mod output;

pub use client::RcIndexer;
pub use output::{parse_completions, parse_locations};
