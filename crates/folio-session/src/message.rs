//! Session messages.
//!
//! Every user interaction and viewport event is a variant of [`Message`]; the
//! session applies them one at a time in [`crate::ViewerSession::update`].

use std::time::Duration;

use folio_pages::PageJump;
use folio_transcript::MarkerPosition;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // =========================================================================
    // Navigation
    // =========================================================================
    /// Go to a page by display token (roman label, arabic number, ordinal).
    GoTo(String),

    /// A page-jump field was submitted.
    Jump(PageJump),

    Previous,

    Next,

    // =========================================================================
    // Viewport
    // =========================================================================
    /// The viewport width changed.
    Resized { width: f64 },

    /// Switch between transcript and image on the single-pane layout.
    ToggleViewMode,

    ToggleFullscreen,

    /// The transcript pane scrolled; marker offsets are relative to its top.
    TranscriptScrolled {
        markers: Vec<MarkerPosition>,
        viewport_height: f64,
    },

    // =========================================================================
    // Divider drag
    // =========================================================================
    DividerPressed,

    DividerMoved { client_x: f64, viewport_width: f64 },

    DividerReleased,

    // =========================================================================
    // Chrome
    // =========================================================================
    Bookmark,

    ToggleInfo,

    ToggleMobileMenu,

    /// Time passed since the previous tick.
    Tick { elapsed: Duration },
}
