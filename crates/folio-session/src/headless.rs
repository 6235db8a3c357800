//! Recording implementations of the viewport capabilities.
//!
//! Used by the CLI to replay interaction scripts and by tests to observe what
//! the session asked its environment to do.

use std::collections::BTreeSet;

use crate::error::{ViewerError, ViewportError};
use crate::viewport::{DeepZoomHost, ImageSource, ScrollBehavior, ViewportController};

/// Something the session asked the viewport to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewportEvent {
    Scrolled {
        id: String,
        behavior: ScrollBehavior,
        found: bool,
    },
    EnteredFullscreen,
    ExitedFullscreen,
    FullscreenDenied,
}

/// Viewport that records requests instead of performing them.
#[derive(Debug, Clone, Default)]
pub struct HeadlessViewport {
    anchors: Option<BTreeSet<String>>,
    fullscreen: bool,
    deny_fullscreen: Option<String>,
    events: Vec<ViewportEvent>,
}

impl HeadlessViewport {
    /// Viewport in which every anchor exists and fullscreen is granted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict scrolling to these anchor ids, e.g. the transcript's markers.
    pub fn with_anchors<I, S>(mut self, anchors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.anchors = Some(anchors.into_iter().map(Into::into).collect());
        self
    }

    /// Make fullscreen requests fail with this reason.
    pub fn deny_fullscreen(mut self, reason: impl Into<String>) -> Self {
        self.deny_fullscreen = Some(reason.into());
        self
    }

    pub fn events(&self) -> &[ViewportEvent] {
        &self.events
    }

    /// Ids scrolled to, in order, whether or not the anchor existed.
    pub fn scrolled_ids(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewportEvent::Scrolled { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl ViewportController for HeadlessViewport {
    fn scroll_to_anchor(&mut self, id: &str, behavior: ScrollBehavior) -> bool {
        let found = self
            .anchors
            .as_ref()
            .is_none_or(|anchors| anchors.contains(id));
        self.events.push(ViewportEvent::Scrolled {
            id: id.to_string(),
            behavior,
            found,
        });
        found
    }

    fn request_fullscreen(&mut self) -> Result<(), ViewportError> {
        if let Some(reason) = &self.deny_fullscreen {
            self.events.push(ViewportEvent::FullscreenDenied);
            return Err(ViewportError::Rejected {
                reason: reason.clone(),
            });
        }
        self.fullscreen = true;
        self.events.push(ViewportEvent::EnteredFullscreen);
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), ViewportError> {
        self.fullscreen = false;
        self.events.push(ViewportEvent::ExitedFullscreen);
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

/// Viewer handle handed out by [`HeadlessImageHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessViewer {
    pub handle: u64,
    pub source: ImageSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    Created { handle: u64, url: String },
    Destroyed { handle: u64 },
    CreateFailed { url: String },
}

/// Deep-zoom host that hands out numbered handles and logs their lifecycle.
#[derive(Debug, Clone, Default)]
pub struct HeadlessImageHost {
    next_handle: u64,
    live: BTreeSet<u64>,
    fail_create: Option<String>,
    events: Vec<ViewerEvent>,
}

impl HeadlessImageHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every create call fail with this reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_create: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn events(&self) -> &[ViewerEvent] {
        &self.events
    }

    /// Number of viewers created and not yet destroyed.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn created_urls(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewerEvent::Created { url, .. } => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DeepZoomHost for HeadlessImageHost {
    type Viewer = HeadlessViewer;

    fn create(&mut self, source: &ImageSource) -> Result<HeadlessViewer, ViewerError> {
        if let Some(reason) = &self.fail_create {
            self.events.push(ViewerEvent::CreateFailed {
                url: source.url.clone(),
            });
            return Err(ViewerError::Create {
                url: source.url.clone(),
                reason: reason.clone(),
            });
        }
        self.next_handle += 1;
        let handle = self.next_handle;
        self.live.insert(handle);
        self.events.push(ViewerEvent::Created {
            handle,
            url: source.url.clone(),
        });
        Ok(HeadlessViewer {
            handle,
            source: source.clone(),
        })
    }

    fn destroy(&mut self, viewer: HeadlessViewer) -> Result<(), ViewerError> {
        if !self.live.remove(&viewer.handle) {
            return Err(ViewerError::Destroy {
                reason: format!("unknown viewer handle {}", viewer.handle),
            });
        }
        self.events.push(ViewerEvent::Destroyed {
            handle: viewer.handle,
        });
        Ok(())
    }
}
