//! Error types for the command-line host.

use thiserror::Error;

/// Errors that can occur while producing a plan.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generation failed in the parser, generator, or formatter.
    #[error(transparent)]
    Pipeline(#[from] stepgen::PipelineError),
}
