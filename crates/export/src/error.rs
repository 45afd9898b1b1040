//! Error types for commit-shards exports.

use thiserror::Error;

/// Errors produced while writing or encoding exported artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A file or directory could not be written.
    #[error("I/O error: {0}")]
    Io(String),

    /// Metadata could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The SVG document could not be parsed or rasterized.
    #[error("raster error: {0}")]
    Raster(String),
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Serialization(e.to_string())
    }
}
