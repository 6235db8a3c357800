//! Integration tests for transcript loading.

use std::fs;

use folio_transcript::{
    MarkerPosition, TranscriptDocument, TranscriptError, TranscriptOptions, scrolled_page,
};

const FACSIMILE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Lyrical Ballads</title><link rel="stylesheet" href="/css/LBstyle.css"></head>
<body>
<div class="newPage" id="0001"><img class="pgImg" src="images/LB00-1_0001.jpg" alt="page i"></div>
<h1>LYRICAL BALLADS</h1>
<div class="newPage" id="0002"><img class="pgImg" src="images/LB00-1_0002.jpg" alt="page ii"></div>
<p>Quam nihil ad genium, Papiniane, tuum!</p>
</body>
</html>
"#;

#[test]
fn test_sanitized_body_snapshot() {
    let doc = TranscriptDocument::parse(FACSIMILE_HTML, &TranscriptOptions::default()).unwrap();
    insta::assert_snapshot!(doc.body().trim(), @r#"
<div class="newPage" id="0001"></div>
<h1>LYRICAL BALLADS</h1>
<div class="newPage" id="0002"></div>
<p>Quam nihil ad genium, Papiniane, tuum!</p>
"#);
    assert_eq!(doc.removed_images(), 2);
}

#[test]
fn test_markers_follow_document_order() {
    let doc = TranscriptDocument::parse(FACSIMILE_HTML, &TranscriptOptions::default()).unwrap();
    let ids: Vec<&str> = doc.markers().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["0001", "0002"]);
}

#[test]
fn test_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("LB00-1_facs.html");
    fs::write(&path, FACSIMILE_HTML).unwrap();

    let doc = TranscriptDocument::from_path(&path, &TranscriptOptions::default()).unwrap();
    assert!(doc.body().contains("LYRICAL BALLADS"));
    assert!(!doc.body().contains("pgImg"));
    assert!(!doc.body().contains("<title>"));
}

#[test]
fn test_missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.html");
    let err = TranscriptDocument::from_path(&path, &TranscriptOptions::default()).unwrap_err();
    assert!(matches!(err, TranscriptError::FileRead { .. }));
}

#[test]
fn test_scroll_chooses_first_of_several_in_band() {
    let positions = vec![
        MarkerPosition::new("0001", -400.0),
        MarkerPosition::new("0002", 12.0),
        MarkerPosition::new("0003", 80.0),
    ];
    assert_eq!(scrolled_page(&positions, 800.0, 0.3, "0001"), Some("0002"));
}
