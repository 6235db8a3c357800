//! Integration tests for the viewer session driven through headless hosts.

use std::time::Duration;

use folio_pages::{PageIndex, PageJump, PageMapping};
use folio_session::{
    HeadlessImageHost, HeadlessViewport, Layout, Message, ReaderSettings, SessionError,
    ViewMode, ViewerEvent, ViewerSession, ViewportError, ViewportEvent,
};
use folio_transcript::MarkerPosition;

const BOOK: &str = r#"{
    "i": "images/LB_0001.jpg",
    "ii": "images/LB_0002.jpg",
    "iii": "images/LB_0003.jpg",
    "1": "images/LB_0004.jpg",
    "2": "images/LB_0005.jpg",
    "3": "images/LB_0006.jpg"
}"#;

const DESKTOP: f64 = 1280.0;
const MOBILE: f64 = 600.0;

fn book() -> PageIndex {
    PageIndex::build(&PageMapping::from_json_str(BOOK).unwrap())
}

fn open<'a>(
    index: &'a PageIndex,
    settings: &'a ReaderSettings,
    width: f64,
) -> ViewerSession<'a, HeadlessViewport, HeadlessImageHost> {
    ViewerSession::new(
        index,
        settings,
        HeadlessViewport::new(),
        HeadlessImageHost::new(),
        width,
    )
    .unwrap()
}

#[test]
fn test_opens_on_default_page() {
    let index = book();
    let settings = ReaderSettings::default();
    let session = open(&index, &settings, DESKTOP);

    assert_eq!(session.current().as_str(), "0005");
    assert_eq!(session.current_label(), "2");
    assert_eq!(session.current_description(), "Arabic 2");
    assert_eq!(session.state().inputs.arabic, "2");
    assert_eq!(session.viewport().scrolled_ids(), vec!["0005"]);
    assert_eq!(session.host().created_urls(), vec!["/images/LB_0005.jpg"]);
    assert!(session.viewer().unwrap().source.show_navigation_controls);
}

#[test]
fn test_falls_back_to_first_page_when_default_missing() {
    let index = book();
    let mut settings = ReaderSettings::default();
    settings.general.default_page = "0099".to_string();
    let session = open(&index, &settings, DESKTOP);
    assert_eq!(session.current().as_str(), "0001");
    assert_eq!(session.current_description(), "Roman i");
    assert_eq!(session.state().inputs.roman, "1");
}

#[test]
fn test_empty_index_is_an_error() {
    let index = PageIndex::build(&PageMapping::from_json_str("{}").unwrap());
    let settings = ReaderSettings::default();
    let result = ViewerSession::new(
        &index,
        &settings,
        HeadlessViewport::new(),
        HeadlessImageHost::new(),
        DESKTOP,
    );
    assert!(matches!(result, Err(SessionError::EmptyIndex)));
}

#[test]
fn test_goto_by_label_and_ordinal() {
    let index = book();
    let settings = ReaderSettings::default();
    let mut session = open(&index, &settings, DESKTOP);

    session.update(Message::GoTo("ii".to_string())).unwrap();
    assert_eq!(session.current().as_str(), "0002");

    session.update(Message::GoTo("3".to_string())).unwrap();
    assert_eq!(session.current().as_str(), "0006");

    // Roman field takes an ordinal.
    session
        .update(Message::Jump(PageJump::Roman("3".to_string())))
        .unwrap();
    assert_eq!(session.current().as_str(), "0003");
    assert_eq!(session.state().inputs.roman, "3");
    assert_eq!(session.state().inputs.arabic, "");
}

#[test]
fn test_goto_zero_is_ignored_and_unknown_goes_home() {
    let index = book();
    let settings = ReaderSettings::default();
    let mut session = open(&index, &settings, DESKTOP);

    session.update(Message::GoTo("0".to_string())).unwrap();
    assert_eq!(session.current().as_str(), "0005");

    session.update(Message::GoTo("xlii".to_string())).unwrap();
    assert_eq!(session.current().as_str(), "0001");
}

#[test]
fn test_previous_and_next_stop_at_the_edges() {
    let index = book();
    let mut settings = ReaderSettings::default();
    settings.general.default_page = "0001".to_string();
    let mut session = open(&index, &settings, DESKTOP);

    session.update(Message::Previous).unwrap();
    assert_eq!(session.current().as_str(), "0001");
    assert_eq!(session.host().created_urls().len(), 1);

    for _ in 0..10 {
        session.update(Message::Next).unwrap();
    }
    assert_eq!(session.current().as_str(), "0006");

    session.update(Message::Previous).unwrap();
    assert_eq!(session.current().as_str(), "0005");
}

#[test]
fn test_viewer_is_replaced_on_navigation() {
    let index = book();
    let settings = ReaderSettings::default();
    let mut session = open(&index, &settings, DESKTOP);
    session.update(Message::Next).unwrap();

    let events = session.host().events();
    assert_eq!(
        events,
        &[
            ViewerEvent::Created {
                handle: 1,
                url: "/images/LB_0005.jpg".to_string()
            },
            ViewerEvent::Destroyed { handle: 1 },
            ViewerEvent::Created {
                handle: 2,
                url: "/images/LB_0006.jpg".to_string()
            },
        ]
    );
    assert_eq!(session.host().live_count(), 1);
}

#[test]
fn test_viewer_failure_is_not_fatal() {
    let index = book();
    let settings = ReaderSettings::default();
    let mut session = ViewerSession::new(
        &index,
        &settings,
        HeadlessViewport::new(),
        HeadlessImageHost::failing("no WebGL"),
        DESKTOP,
    )
    .unwrap();
    assert!(session.viewer().is_none());
    session.update(Message::Next).unwrap();
    assert_eq!(session.current().as_str(), "0006");
    assert!(session.viewer().is_none());
}

#[test]
fn test_resize_to_mobile_recreates_viewer_without_controls() {
    let index = book();
    let settings = ReaderSettings::default();
    let mut session = open(&index, &settings, DESKTOP);
    session.update(Message::ToggleMobileMenu).unwrap();

    session.update(Message::Resized { width: MOBILE }).unwrap();
    assert_eq!(session.state().layout, Layout::Mobile);
    assert!(!session.state().mobile_menu_open);
    // Mobile starts on the transcript, so there is no image viewer.
    assert!(session.viewer().is_none());
    assert_eq!(session.host().live_count(), 0);

    session.update(Message::ToggleViewMode).unwrap();
    assert_eq!(session.state().view_mode, ViewMode::Image);
    assert!(!session.viewer().unwrap().source.show_navigation_controls);

    // Resizing within the same layout changes nothing.
    let created = session.host().created_urls().len();
    session.update(Message::Resized { width: MOBILE + 100.0 }).unwrap();
    assert_eq!(session.host().created_urls().len(), created);
}

#[test]
fn test_view_mode_toggle_only_on_mobile() {
    let index = book();
    let settings = ReaderSettings::default();
    let mut session = open(&index, &settings, DESKTOP);
    session.update(Message::ToggleViewMode).unwrap();
    assert_eq!(session.state().view_mode, ViewMode::Transcript);

    let mut session = open(&index, &settings, MOBILE);
    session.update(Message::ToggleViewMode).unwrap();
    session.update(Message::ToggleViewMode).unwrap();
    assert_eq!(session.state().view_mode, ViewMode::Transcript);
    let last = session.viewport().events().last().cloned();
    assert!(matches!(
        last,
        Some(ViewportEvent::Scrolled { ref id, .. }) if id == "0005"
    ));
}

#[test]
fn test_divider_drag_respects_band() {
    let index = book();
    let settings = ReaderSettings::default();
    let mut session = open(&index, &settings, DESKTOP);

    session.update(Message::DividerPressed).unwrap();
    session
        .update(Message::DividerMoved {
            client_x: 150.0,
            viewport_width: 1000.0,
        })
        .unwrap();
    assert_eq!(session.state().divider.position(), 60.0);

    session
        .update(Message::DividerMoved {
            client_x: 500.0,
            viewport_width: 1000.0,
        })
        .unwrap();
    assert_eq!(session.state().divider.position(), 50.0);

    session.update(Message::DividerReleased).unwrap();
    session
        .update(Message::DividerMoved {
            client_x: 700.0,
            viewport_width: 1000.0,
        })
        .unwrap();
    assert_eq!(session.state().divider.position(), 50.0);
}

#[test]
fn test_divider_cannot_be_pressed_on_mobile() {
    let index = book();
    let settings = ReaderSettings::default();
    let mut session = open(&index, &settings, MOBILE);
    session.update(Message::DividerPressed).unwrap();
    assert!(!session.state().divider.is_dragging());
}

#[test]
fn test_scroll_sync_takes_first_marker_in_band() {
    let index = book();
    let settings = ReaderSettings::default();
    let mut session = open(&index, &settings, DESKTOP);
    session.update(Message::GoTo("i".to_string())).unwrap();
    let scrolls_before = session.viewport().scrolled_ids().len();

    session
        .update(Message::TranscriptScrolled {
            markers: vec![
                MarkerPosition::new("0001", -400.0),
                MarkerPosition::new("0002", 20.0),
                MarkerPosition::new("0003", 100.0),
            ],
            viewport_height: 1000.0,
        })
        .unwrap();
    assert_eq!(session.current().as_str(), "0002");
    assert_eq!(session.state().inputs.roman, "2");
    // Following the scroll never scrolls the transcript back.
    assert_eq!(session.viewport().scrolled_ids().len(), scrolls_before);
    assert_eq!(
        session.host().created_urls().last().copied(),
        Some("/images/LB_0002.jpg")
    );
}

#[test]
fn test_scroll_sync_ignores_markers_outside_band_or_unknown() {
    let index = book();
    let settings = ReaderSettings::default();
    let mut session = open(&index, &settings, DESKTOP);

    session
        .update(Message::TranscriptScrolled {
            markers: vec![MarkerPosition::new("0002", 300.0)],
            viewport_height: 1000.0,
        })
        .unwrap();
    assert_eq!(session.current().as_str(), "0005");

    session
        .update(Message::TranscriptScrolled {
            markers: vec![MarkerPosition::new("0042", 10.0)],
            viewport_height: 1000.0,
        })
        .unwrap();
    assert_eq!(session.current().as_str(), "0005");
}

#[test]
fn test_fullscreen_toggles_and_reports_denial() {
    let index = book();
    let settings = ReaderSettings::default();
    let mut session = open(&index, &settings, DESKTOP);
    session.update(Message::ToggleFullscreen).unwrap();
    assert!(session.state().fullscreen);
    session.update(Message::ToggleFullscreen).unwrap();
    assert!(!session.state().fullscreen);

    let mut denied = ViewerSession::new(
        &index,
        &settings,
        HeadlessViewport::new().deny_fullscreen("no user gesture"),
        HeadlessImageHost::new(),
        DESKTOP,
    )
    .unwrap();
    let err = denied.update(Message::ToggleFullscreen).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Fullscreen(ViewportError::Rejected { .. })
    ));
    assert!(!denied.state().fullscreen);
}

#[test]
fn test_bookmark_toast_expires() {
    let index = book();
    let settings = ReaderSettings::default();
    let mut session = open(&index, &settings, MOBILE);
    session.update(Message::ToggleMobileMenu).unwrap();
    session.update(Message::Bookmark).unwrap();
    assert!(!session.state().mobile_menu_open);
    assert_eq!(
        session.state().toast.as_ref().map(|toast| toast.message.as_str()),
        Some("Page bookmarked for later reading.")
    );

    session
        .update(Message::Tick {
            elapsed: Duration::from_millis(2000),
        })
        .unwrap();
    assert!(session.state().toast.is_some());
    session
        .update(Message::Tick {
            elapsed: Duration::from_millis(600),
        })
        .unwrap();
    assert!(session.state().toast.is_none());
}

#[test]
fn test_info_panel_toggles() {
    let index = book();
    let settings = ReaderSettings::default();
    let mut session = open(&index, &settings, DESKTOP);
    session.update(Message::ToggleInfo).unwrap();
    assert!(session.state().info_open);
    session.update(Message::ToggleInfo).unwrap();
    assert!(!session.state().info_open);
}

#[test]
fn test_settings_round_trip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("reader.toml");

    let missing = ReaderSettings::load_from(&path).unwrap();
    assert_eq!(missing, ReaderSettings::default());

    let mut settings = ReaderSettings::default();
    settings.general.default_page = "0002".to_string();
    settings.layout.mobile_breakpoint_px = 900.0;
    settings.save_to(&path).unwrap();

    let loaded = ReaderSettings::load_from(&path).unwrap();
    assert_eq!(loaded, settings);

    let index = book();
    let session = open(&index, &loaded, 950.0);
    assert_eq!(session.current().as_str(), "0002");
    assert_eq!(session.state().layout, Layout::Desktop);
}

#[test]
fn test_invalid_settings_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reader.toml");
    std::fs::write(&path, "[scroll]\nband_ratio = 2.0\n").unwrap();
    assert!(ReaderSettings::load_from(&path).is_err());

    std::fs::write(&path, "[layout\n").unwrap();
    assert!(ReaderSettings::load_from(&path).is_err());
}
