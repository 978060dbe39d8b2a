//! CLI presentation helpers.
//!
//! Rendering of lookup reports for the terminal and end-of-run statistics.

pub mod output;
pub mod statistics;

pub use output::{render_json, render_table};
pub use statistics::print_lookup_statistics;
