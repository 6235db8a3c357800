//! Transcript pane support for the facsimile reader.
//!
//! - [`document`]: load a transcript, drop inline page scans, find page markers
//! - [`scroll`]: decide the current page from marker positions

pub mod document;
pub mod error;
pub mod scroll;

pub use document::{PageMarker, TranscriptDocument, TranscriptOptions};
pub use error::{Result, TranscriptError};
pub use scroll::{DEFAULT_BAND_RATIO, MarkerPosition, current_page_in_band, scrolled_page};
