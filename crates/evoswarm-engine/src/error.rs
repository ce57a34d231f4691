//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and shutdown.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: evoswarm_core::config::ConfigError,
    },

    /// The series windows could not be built from config.
    #[error("series error: {source}")]
    Series {
        /// The underlying series error.
        #[from]
        source: evoswarm_core::series::SeriesError,
    },

    /// The report template could not be loaded or rendered.
    #[error("report error: {source}")]
    Report {
        /// The underlying report error.
        #[from]
        source: evoswarm_core::report::ReportError,
    },

    /// Observer API server failed to start.
    #[error("observer error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: evoswarm_observer::ServerError,
    },

    /// Writing the shutdown report failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
