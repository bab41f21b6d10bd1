//! Data types for composite export.

use thiserror::Error;

/// Errors that can occur while delivering an exported composite.
///
/// Producing the composite itself cannot fail once a base image is loaded;
/// these cover the encode and sink steps that follow.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode composite: {0}")]
    Encode(String),

    #[error("Clipboard operation failed: {0}")]
    Clipboard(String),

    #[error("Failed to save composite: {0}")]
    Save(#[from] std::io::Error),
}
