//! Error types for Cutline.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for Cutline operations.
#[derive(Error, Debug)]
pub enum CutlineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown filetype: {0}")]
    UnknownFileType(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Element not found: {0}")]
    NotFound(Uuid),

    #[error("Text element {child} references missing parent {parent}")]
    MissingParent { child: Uuid, parent: Uuid },

    #[error("Timeline error: {0}")]
    Timeline(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Cutline operations.
pub type Result<T> = std::result::Result<T, CutlineError>;
