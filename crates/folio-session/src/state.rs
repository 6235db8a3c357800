//! Navigation state.
//!
//! This module contains the session-scoped state types:
//! - `ViewMode`: transcript or image, on narrow screens
//! - `Layout`: single pane or split pane
//! - `Divider`: the draggable split between the panes
//! - `Toast`: the bookmark notification
//! - `NavigationState`: all of the above plus the current page

use std::time::Duration;

use folio_model::PageId;
use folio_pages::PageInputs;

// =============================================================================
// VIEW MODE
// =============================================================================

/// Which pane the single-pane layout shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    #[default]
    Transcript,
    Image,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Transcript => Self::Image,
            Self::Image => Self::Transcript,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Transcript => "transcript",
            Self::Image => "image",
        }
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Transcript and image side by side with a divider.
    #[default]
    Desktop,
    /// One pane at a time, switched with the view-mode toggle.
    Mobile,
}

impl Layout {
    /// Layout for a viewport width; strictly narrower than the breakpoint is mobile.
    pub fn for_width(width: f64, breakpoint: f64) -> Self {
        if width < breakpoint {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn is_mobile(&self) -> bool {
        matches!(self, Self::Mobile)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }
}

// =============================================================================
// DIVIDER
// =============================================================================

/// Split position between the transcript and image panes, in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct Divider {
    position: f64,
    min: f64,
    max: f64,
    dragging: bool,
}

impl Divider {
    pub fn new(position: f64, min: f64, max: f64) -> Self {
        Self {
            position,
            min,
            max,
            dragging: false,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn press(&mut self) {
        self.dragging = true;
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Move the divider to the pointer. Positions outside the open band
    /// `(min, max)` are ignored rather than clamped.
    ///
    /// Returns `true` when the position changed.
    pub fn drag_to(&mut self, client_x: f64, viewport_width: f64) -> bool {
        if !self.dragging || viewport_width <= 0.0 {
            return false;
        }
        let pct = client_x / viewport_width * 100.0;
        if pct > self.min && pct < self.max {
            self.position = pct;
            true
        } else {
            false
        }
    }
}

// =============================================================================
// TOAST
// =============================================================================

/// Short-lived notification. Nothing is stored; it only confirms the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    remaining: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            remaining: duration,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Advance the clock; returns `false` once the toast has expired.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(elapsed);
        !self.remaining.is_zero()
    }
}

// =============================================================================
// NAVIGATION STATE
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    pub current: PageId,
    pub view_mode: ViewMode,
    pub layout: Layout,
    pub viewport_width: f64,
    pub fullscreen: bool,
    pub divider: Divider,
    pub info_open: bool,
    pub mobile_menu_open: bool,
    pub toast: Option<Toast>,
    /// Prefilled page-jump fields for the current page.
    pub inputs: PageInputs,
}

impl NavigationState {
    /// Whether the image pane is on screen.
    pub fn image_visible(&self) -> bool {
        !self.layout.is_mobile() || self.view_mode == ViewMode::Image
    }

    /// Whether the transcript pane is on screen.
    pub fn transcript_visible(&self) -> bool {
        !self.layout.is_mobile() || self.view_mode == ViewMode::Transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divider_ignores_moves_outside_band() {
        let mut divider = Divider::new(60.0, 20.0, 80.0);
        divider.press();
        assert!(!divider.drag_to(150.0, 1000.0));
        assert_eq!(divider.position(), 60.0);
        assert!(!divider.drag_to(200.0, 1000.0));
        assert!(!divider.drag_to(800.0, 1000.0));
        assert!(divider.drag_to(500.0, 1000.0));
        assert_eq!(divider.position(), 50.0);
    }

    #[test]
    fn divider_moves_only_while_pressed() {
        let mut divider = Divider::new(60.0, 20.0, 80.0);
        assert!(!divider.drag_to(500.0, 1000.0));
        divider.press();
        divider.release();
        assert!(!divider.drag_to(500.0, 1000.0));
        assert_eq!(divider.position(), 60.0);
    }

    #[test]
    fn layout_breakpoint_is_exclusive() {
        assert_eq!(Layout::for_width(1023.0, 1024.0), Layout::Mobile);
        assert_eq!(Layout::for_width(1024.0, 1024.0), Layout::Desktop);
    }

    #[test]
    fn toast_expires() {
        let mut toast = Toast::new("saved", Duration::from_millis(2500));
        assert!(toast.advance(Duration::from_millis(2000)));
        assert!(!toast.advance(Duration::from_millis(500)));
        assert!(toast.remaining().is_zero());
    }
}
