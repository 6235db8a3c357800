//! Error types for transcript loading.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranscriptError {
    /// Failed to read the transcript file.
    #[error("failed to read transcript {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Markup could not be tokenized.
    #[error("malformed transcript markup at byte {position}: {message}")]
    Markup { position: u64, message: String },

    /// Re-serializing the sanitized body failed.
    #[error("failed to write sanitized transcript: {0}")]
    Write(String),

    /// Sanitized output was not UTF-8.
    #[error("sanitized transcript is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, TranscriptError>;
