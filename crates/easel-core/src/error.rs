//! Error types for editor operations.

use crate::elements::ElementId;
use thiserror::Error;

/// Errors reported by the editor core.
///
/// None of these are fatal: every operation that returns one has left the
/// document and viewport exactly as they were before the call.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Non-finite geometry input: {0}")]
    NonFiniteInput(&'static str),
    #[error("Unsupported media type `{mime}` (expected {expected})")]
    UnsupportedMediaType { mime: String, expected: &'static str },
    #[error("Upload of {size} bytes exceeds the {limit} byte limit")]
    UploadTooLarge { size: usize, limit: usize },
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),
    #[error("Element {0} does not accept uploads")]
    NotUploadable(ElementId),
    #[error("Element id {0} is already in use or was retired")]
    DuplicateId(ElementId),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
