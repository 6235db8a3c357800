//! Capabilities the session needs from its host environment.
//!
//! A browser build implements these over the DOM and the deep-zoom library;
//! tests and the CLI use the recording implementations in [`crate::headless`].

use crate::error::{ViewerError, ViewportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

impl ScrollBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Smooth => "smooth",
        }
    }
}

/// Scrolling and fullscreen control over the reader's viewport.
pub trait ViewportController {
    /// Bring the transcript anchor with this id into view.
    ///
    /// Returns `false` when no such anchor exists.
    fn scroll_to_anchor(&mut self, id: &str, behavior: ScrollBehavior) -> bool;

    fn request_fullscreen(&mut self) -> Result<(), ViewportError>;

    fn exit_fullscreen(&mut self) -> Result<(), ViewportError>;

    /// Whether the environment is currently fullscreen.
    fn is_fullscreen(&self) -> bool;
}

/// Single-image tile source handed to the deep-zoom viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub url: String,
    /// Zoom/home/navigation buttons; hidden on narrow viewports.
    pub show_navigation_controls: bool,
}

/// Factory for deep-zoom viewer instances.
///
/// The session owns at most one viewer at a time and always destroys the
/// previous one before creating the next.
pub trait DeepZoomHost {
    type Viewer;

    fn create(&mut self, source: &ImageSource) -> Result<Self::Viewer, ViewerError>;

    fn destroy(&mut self, viewer: Self::Viewer) -> Result<(), ViewerError>;
}
