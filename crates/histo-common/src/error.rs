//! Error types for the histogram rendering pipeline.

use thiserror::Error;

/// Result type alias using HistoError.
pub type HistoResult<T> = Result<T, HistoError>;

/// Primary error type for histogram pipeline operations.
///
/// Errors are raised as close to the offending input as possible and are
/// never downgraded to a default style or format. Mapping to transport
/// status codes is the caller's concern.
#[derive(Debug, Error)]
pub enum HistoError {
    /// Malformed or out-of-range pixel buffer or numeric configuration.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Style name not present in the registry.
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// Individually valid parameters that cannot be honored together.
    #[error("Unsupported configuration: {0}")]
    UnsupportedConfig(String),

    /// Primitive rasterization or serialization failure.
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// The caller cancelled the request between pipeline stages.
    #[error("Request cancelled")]
    Cancelled,
}
