//! Error handling for report generation

use thiserror::Error;

/// Report generation error types
#[derive(Error, Debug)]
pub enum ReportError {
    /// The supplied chart image could not be decoded. The export fails as a
    /// whole; no partial document is produced.
    #[error("Chart image unavailable: {0}")]
    ImageUnavailable(String),

    #[error("Chart rendering failed: {0}")]
    ChartRender(String),

    #[error("Document assembly failed: {0}")]
    Document(String),
}

/// Result type alias for report operations
pub type ReportResult<T> = Result<T, ReportError>;
