//! Input/Output operations for temperature sweeps
//!
//! This module handles logging setup and tabular result output.

mod output;

pub use output::{print_results, setup_output};
