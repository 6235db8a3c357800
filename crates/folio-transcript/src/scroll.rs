//! Scroll-position page detection.
//!
//! While the reader scrolls the transcript pane, the page whose boundary
//! marker sits near the top of the viewport becomes the current page.

use serde::{Deserialize, Serialize};

/// Fraction of the viewport height, from the top, in which a marker counts.
pub const DEFAULT_BAND_RATIO: f64 = 0.3;

/// A page marker and its distance from the top of the viewport, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerPosition {
    pub id: String,
    pub top: f64,
}

impl MarkerPosition {
    pub fn new(id: impl Into<String>, top: f64) -> Self {
        Self { id: id.into(), top }
    }
}

/// First marker, in document order, whose top lies in `[0, height * ratio)`.
///
/// Later markers are not considered once one qualifies, even if they are also
/// inside the band.
pub fn current_page_in_band(
    markers: &[MarkerPosition],
    viewport_height: f64,
    band_ratio: f64,
) -> Option<&MarkerPosition> {
    let band = viewport_height * band_ratio;
    markers
        .iter()
        .find(|marker| marker.top >= 0.0 && marker.top < band)
}

/// Page to switch to after a scroll, `None` when nothing should change.
///
/// The in-band marker must carry an id and differ from `current`.
pub fn scrolled_page<'a>(
    markers: &'a [MarkerPosition],
    viewport_height: f64,
    band_ratio: f64,
    current: &str,
) -> Option<&'a str> {
    current_page_in_band(markers, viewport_height, band_ratio)
        .map(|marker| marker.id.as_str())
        .filter(|id| !id.is_empty() && *id != current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(pairs: &[(&str, f64)]) -> Vec<MarkerPosition> {
        pairs
            .iter()
            .map(|(id, top)| MarkerPosition::new(*id, *top))
            .collect()
    }

    #[test]
    fn picks_first_marker_in_band() {
        let list = markers(&[("0003", -120.0), ("0004", 40.0), ("0005", 150.0)]);
        let found = current_page_in_band(&list, 1000.0, DEFAULT_BAND_RATIO);
        assert_eq!(found.map(|m| m.id.as_str()), Some("0004"));
    }

    #[test]
    fn band_upper_edge_is_exclusive() {
        let list = markers(&[("0004", 300.0)]);
        assert!(current_page_in_band(&list, 1000.0, DEFAULT_BAND_RATIO).is_none());
        let list = markers(&[("0004", 0.0)]);
        assert!(current_page_in_band(&list, 1000.0, DEFAULT_BAND_RATIO).is_some());
    }

    #[test]
    fn nothing_in_band() {
        let list = markers(&[("0003", -10.0), ("0004", 900.0)]);
        assert!(current_page_in_band(&list, 1000.0, DEFAULT_BAND_RATIO).is_none());
    }

    #[test]
    fn unchanged_or_blank_ids_are_ignored() {
        let list = markers(&[("0004", 10.0)]);
        assert_eq!(scrolled_page(&list, 1000.0, 0.3, "0004"), None);
        assert_eq!(scrolled_page(&list, 1000.0, 0.3, "0003"), Some("0004"));

        // A blank first match stops the search; later markers are not used.
        let list = markers(&[("", 10.0), ("0005", 20.0)]);
        assert_eq!(scrolled_page(&list, 1000.0, 0.3, "0003"), None);
    }
}
