//! Error types for the batch engine binary.
//!
//! [`EngineError`] wraps every failure mode between loading the
//! configuration and printing the report.

/// Top-level error for the batch engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: heroism_core::config::ConfigError,
    },

    /// The batch could not be run.
    #[error("batch error: {source}")]
    Batch {
        /// The underlying batch error.
        #[from]
        source: heroism_core::batch::BatchError,
    },

    /// The report could not be serialized.
    #[error("report serialization error: {source}")]
    Report {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Writing the report failed.
    #[error("output error: {source}")]
    Output {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
