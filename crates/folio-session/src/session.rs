//! Viewer session: navigation state plus the effects each message has on the
//! transcript pane and the image viewer.

use std::time::Duration;

use folio_model::{PageEntry, PageId};
use folio_pages::{PageIndex, PageInputs};
use folio_transcript::{MarkerPosition, scrolled_page};
use tracing::{debug, warn};

use crate::error::SessionError;
use crate::message::Message;
use crate::settings::ReaderSettings;
use crate::state::{Divider, Layout, NavigationState, Toast, ViewMode};
use crate::viewport::{DeepZoomHost, ImageSource, ScrollBehavior, ViewportController};

/// One reader session over an immutable page index.
///
/// The session owns the viewport controller, the deep-zoom host and the live
/// viewer (if any). The viewer is recreated whenever the page or the layout
/// changes and destroyed when the session is dropped.
pub struct ViewerSession<'a, V, H>
where
    V: ViewportController,
    H: DeepZoomHost,
{
    index: &'a PageIndex,
    settings: &'a ReaderSettings,
    state: NavigationState,
    viewport: V,
    host: H,
    viewer: Option<H::Viewer>,
}

impl<'a, V, H> ViewerSession<'a, V, H>
where
    V: ViewportController,
    H: DeepZoomHost,
{
    /// Open a session on the configured default page.
    ///
    /// Falls back to the first page when the default is not indexed.
    pub fn new(
        index: &'a PageIndex,
        settings: &'a ReaderSettings,
        viewport: V,
        host: H,
        viewport_width: f64,
    ) -> Result<Self, SessionError> {
        let first = index.first().ok_or(SessionError::EmptyIndex)?;
        let current = index
            .entry(&settings.general.default_page)
            .unwrap_or(first)
            .id
            .clone();
        let layout_settings = &settings.layout;
        let state = NavigationState {
            inputs: PageInputs::for_page(index, current.as_str()),
            current,
            view_mode: ViewMode::default(),
            layout: Layout::for_width(viewport_width, layout_settings.mobile_breakpoint_px),
            viewport_width,
            fullscreen: viewport.is_fullscreen(),
            divider: Divider::new(
                layout_settings.divider_initial_pct,
                layout_settings.divider_min_pct,
                layout_settings.divider_max_pct,
            ),
            info_open: false,
            mobile_menu_open: false,
            toast: None,
        };
        debug!(
            page = %state.current,
            layout = state.layout.name(),
            "opened viewer session"
        );
        let mut session = Self {
            index,
            settings,
            state,
            viewport,
            host,
            viewer: None,
        };
        session.refresh_viewer();
        session.scroll_transcript(ScrollBehavior::Instant);
        Ok(session)
    }

    /// Apply one message.
    ///
    /// Only fullscreen failures are returned; every other message is total.
    pub fn update(&mut self, message: Message) -> Result<(), SessionError> {
        match message {
            Message::GoTo(token) => self.go_to(&token),
            Message::Jump(jump) => match jump.token() {
                Some(token) => self.go_to(&token),
                None => debug!(?jump, "ignoring empty page jump"),
            },
            Message::Previous => {
                if let Some(entry) = self.index.previous(self.state.current.as_str()) {
                    self.navigate_to(entry.id.clone());
                }
            }
            Message::Next => {
                if let Some(entry) = self.index.next(self.state.current.as_str()) {
                    self.navigate_to(entry.id.clone());
                }
            }
            Message::Resized { width } => self.resize(width),
            Message::ToggleViewMode => self.toggle_view_mode(),
            Message::ToggleFullscreen => self.toggle_fullscreen()?,
            Message::TranscriptScrolled {
                markers,
                viewport_height,
            } => self.sync_to_scroll(&markers, viewport_height),
            Message::DividerPressed => {
                if !self.state.layout.is_mobile() {
                    self.state.divider.press();
                }
            }
            Message::DividerMoved {
                client_x,
                viewport_width,
            } => {
                if self.state.divider.drag_to(client_x, viewport_width) {
                    debug!(position = self.state.divider.position(), "moved divider");
                }
            }
            Message::DividerReleased => self.state.divider.release(),
            Message::Bookmark => {
                let bookmark = &self.settings.bookmark;
                self.state.toast = Some(Toast::new(
                    bookmark.message.clone(),
                    Duration::from_millis(bookmark.duration_ms),
                ));
                self.state.mobile_menu_open = false;
            }
            Message::ToggleInfo => self.state.info_open = !self.state.info_open,
            Message::ToggleMobileMenu => {
                self.state.mobile_menu_open = !self.state.mobile_menu_open;
            }
            Message::Tick { elapsed } => {
                if let Some(toast) = self.state.toast.as_mut()
                    && !toast.advance(elapsed)
                {
                    self.state.toast = None;
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current(&self) -> &PageId {
        &self.state.current
    }

    pub fn current_entry(&self) -> Option<&'a PageEntry> {
        self.index.entry(self.state.current.as_str())
    }

    /// Label of the current page as shown in the page-jump controls.
    pub fn current_label(&self) -> &str {
        self.index.display_for(self.state.current.as_str())
    }

    /// `"Roman ii"`, `"Arabic 12"`, or a dash when the page is unknown.
    pub fn current_description(&self) -> String {
        match self.current_entry() {
            Some(entry) => format!("{} {}", entry.kind.label(), entry.label),
            None => "\u{2014}".to_string(),
        }
    }

    pub fn index(&self) -> &'a PageIndex {
        self.index
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn viewer(&self) -> Option<&H::Viewer> {
        self.viewer.as_ref()
    }

    /// Tile source for the current page, `None` when the page has no entry.
    pub fn image_source(&self) -> Option<ImageSource> {
        let entry = self.current_entry()?;
        Some(ImageSource {
            url: self.settings.viewer.image_url(&entry.image_path),
            show_navigation_controls: !self.state.layout.is_mobile(),
        })
    }

    // =========================================================================
    // Effects
    // =========================================================================

    fn go_to(&mut self, token: &str) {
        match self.index.internal_for(token) {
            Some(id) => self.navigate_to(id),
            None => debug!(token, "page token did not resolve"),
        }
    }

    fn navigate_to(&mut self, id: PageId) {
        let changed = id != self.state.current;
        if changed {
            debug!(from = %self.state.current, to = %id, "navigating");
            self.set_current(id);
        }
        self.scroll_transcript(ScrollBehavior::Smooth);
        if changed {
            self.refresh_viewer();
        }
    }

    fn set_current(&mut self, id: PageId) {
        self.state.inputs = PageInputs::for_page(self.index, id.as_str());
        self.state.current = id;
    }

    fn scroll_transcript(&mut self, behavior: ScrollBehavior) {
        if !self.state.transcript_visible() {
            return;
        }
        if !self.viewport.scroll_to_anchor(self.state.current.as_str(), behavior) {
            debug!(page = %self.state.current, "no transcript anchor for page");
        }
    }

    fn resize(&mut self, width: f64) {
        self.state.viewport_width = width;
        let layout = Layout::for_width(width, self.settings.layout.mobile_breakpoint_px);
        if layout == self.state.layout {
            return;
        }
        debug!(from = self.state.layout.name(), to = layout.name(), width, "layout changed");
        self.state.layout = layout;
        self.state.mobile_menu_open = false;
        self.state.divider.release();
        self.refresh_viewer();
        self.scroll_transcript(ScrollBehavior::Instant);
    }

    fn toggle_view_mode(&mut self) {
        if !self.state.layout.is_mobile() {
            return;
        }
        self.state.view_mode = self.state.view_mode.toggled();
        debug!(mode = self.state.view_mode.name(), "view mode changed");
        self.refresh_viewer();
        if self.state.view_mode == ViewMode::Transcript {
            self.scroll_transcript(ScrollBehavior::Instant);
        }
    }

    fn toggle_fullscreen(&mut self) -> Result<(), SessionError> {
        if self.viewport.is_fullscreen() {
            self.viewport.exit_fullscreen()?;
            self.state.fullscreen = false;
        } else {
            self.viewport.request_fullscreen()?;
            self.state.fullscreen = true;
        }
        Ok(())
    }

    /// Follow the transcript: the first marker in the top band becomes the
    /// current page. The transcript is not scrolled back to the anchor, the
    /// user is already there.
    fn sync_to_scroll(&mut self, markers: &[MarkerPosition], viewport_height: f64) {
        let Some(id) = scrolled_page(
            markers,
            viewport_height,
            self.settings.scroll.band_ratio,
            self.state.current.as_str(),
        ) else {
            return;
        };
        let Some(entry) = self.index.entry(id) else {
            debug!(marker = id, "scrolled past a marker that is not indexed");
            return;
        };
        debug!(from = %self.state.current, to = %entry.id, "page followed scroll");
        self.set_current(entry.id.clone());
        self.refresh_viewer();
    }

    /// Tear down the live viewer and, if the image pane is visible, create a
    /// new one for the current page.
    fn refresh_viewer(&mut self) {
        self.release_viewer();
        if !self.state.image_visible() {
            return;
        }
        let Some(source) = self.image_source() else {
            return;
        };
        match self.host.create(&source) {
            Ok(viewer) => self.viewer = Some(viewer),
            Err(err) => warn!(error = %err, url = %source.url, "image viewer unavailable"),
        }
    }

    fn release_viewer(&mut self) {
        if let Some(viewer) = self.viewer.take()
            && let Err(err) = self.host.destroy(viewer)
        {
            debug!(error = %err, "ignoring viewer teardown failure");
        }
    }
}

impl<V, H> Drop for ViewerSession<'_, V, H>
where
    V: ViewportController,
    H: DeepZoomHost,
{
    fn drop(&mut self) {
        self.release_viewer();
    }
}
