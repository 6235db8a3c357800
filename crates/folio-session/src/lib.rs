//! Viewer session for the facsimile reader.
//!
//! The session keeps the current page, the pane layout and the chrome state
//! (divider, info panel, bookmark toast) and drives two host capabilities:
//! a [`ViewportController`] for transcript scrolling and fullscreen, and a
//! [`DeepZoomHost`] for the page image viewer.

pub mod error;
pub mod headless;
pub mod message;
pub mod session;
pub mod settings;
pub mod state;
pub mod viewport;

pub use error::{SessionError, SettingsError, ViewerError, ViewportError};
pub use headless::{HeadlessImageHost, HeadlessViewer, HeadlessViewport, ViewerEvent, ViewportEvent};
pub use message::Message;
pub use session::ViewerSession;
pub use settings::{
    BookmarkSettings, GeneralSettings, LayoutSettings, ReaderSettings, ScrollSettings,
    ViewerSettings,
};
pub use state::{Divider, Layout, NavigationState, Toast, ViewMode};
pub use viewport::{DeepZoomHost, ImageSource, ScrollBehavior, ViewportController};
