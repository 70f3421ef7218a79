//! Command-line host for the `stepgen` generation pipeline.
//!
//! The `stepgen` binary reads a feature file, selects a range of its lines,
//! and prints the plan of units a step generator would produce for that
//! selection: one per scenario, outline, or step line.
//!
//! # Configuration
//!
//! - `STEPGEN_LOG_LEVEL`: log verbosity (trace, debug, info, warn, error)
//! - `STEPGEN_HEURISTIC`: selection heuristic (text, structure)
//! - `STEPGEN_FORMAT`: plan format (text, json)
//!
//! Command-line flags take precedence over the environment.

pub mod config;
pub mod error;
pub mod logging;
pub mod plan;
