//! Error types for mapping operations and list configuration.

#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// Malformed mapping document.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported document version: {0}")]
    UnsupportedVersion(u32),

    #[error("unknown source item: {0}")]
    UnknownItem(String),

    #[error("canonical name must not be empty")]
    EmptyCanonical,

    #[error("no items selected")]
    EmptySelection,

    #[error("unknown mapping group: {0}")]
    UnknownGroup(String),

    /// Width option that is neither pixels nor a percentage.
    #[error("invalid list width: {0:?}")]
    InvalidWidth(String),
}

pub type Result<T> = std::result::Result<T, MappingError>;
