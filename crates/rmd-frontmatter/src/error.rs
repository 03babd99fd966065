//! Error types for front matter interchange

use thiserror::Error;

/// Errors that can occur while reading or writing front matter records
///
/// The accessor operations themselves never fail; only conversion to and
/// from the JSON interchange form does.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Front matter must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error(
        "Invalid output field: expected a mapping, a format name or a list of format names, found {found}"
    )]
    InvalidOutput { found: &'static str },
}

/// Result type for front matter operations
pub type Result<T> = std::result::Result<T, FrontMatterError>;
