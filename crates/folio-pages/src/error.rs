//! Error types for page mapping files.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a page mapping.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Failed to read the mapping file.
    #[error("failed to read page mapping {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mapping is not valid JSON.
    #[error("failed to parse page mapping: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON root is not an object of label → path.
    #[error("page mapping must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// A mapping value is not a string path.
    #[error("page mapping value for '{label}' must be a string, found {found}")]
    NonStringPath { label: String, found: &'static str },
}

pub type Result<T> = std::result::Result<T, MappingError>;
