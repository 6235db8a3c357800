//! Session error types.
//!
//! Viewer construction and teardown failures never reach the caller: the
//! session logs them and carries on without an image. Fullscreen failures do,
//! so the host can tell the user why nothing happened.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a [`crate::ViewportController`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewportError {
    /// The environment refused the request (no user gesture, policy, …).
    #[error("viewport request rejected: {reason}")]
    Rejected { reason: String },

    /// The environment has no such capability.
    #[error("viewport does not support {capability}")]
    Unsupported { capability: &'static str },
}

/// Failure reported by a [`crate::DeepZoomHost`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    #[error("failed to create image viewer for {url}: {reason}")]
    Create { url: String, reason: String },

    #[error("failed to destroy image viewer: {reason}")]
    Destroy { reason: String },
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SessionError {
    /// The page index has no pages to show.
    #[error("page index is empty")]
    EmptyIndex,

    /// Entering or leaving fullscreen failed.
    #[error("fullscreen toggle failed: {0}")]
    Fullscreen(#[from] ViewportError),
}

/// Errors loading or saving reader settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write settings {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Invalid(String),
}
