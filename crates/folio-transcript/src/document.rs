//! Transcript document loading.
//!
//! The transcript is an HTML export with an inline thumbnail of every page
//! scan (`<img class="pgImg">`) and an anchor element at every page boundary
//! (`<span class="newPage" id="0007">`). The reader shows the scans in its own
//! image pane, so the thumbnails are dropped and only the body content is
//! kept. The markup is tokenized leniently: unclosed and stray end tags are
//! accepted and everything that is not removed is written back byte for byte.

use std::fs;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TranscriptError};

/// Class names used to recognize page images and page boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptOptions {
    /// Class carried by inline page-scan thumbnails, which are removed.
    pub page_image_class: String,
    /// Class carried by page-boundary anchors.
    pub page_marker_class: String,
}

impl Default for TranscriptOptions {
    fn default() -> Self {
        Self {
            page_image_class: "pgImg".to_string(),
            page_marker_class: "newPage".to_string(),
        }
    }
}

/// A page-boundary anchor found in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMarker {
    /// Anchor id, the internal page id it starts.
    pub id: String,
    /// Element name carrying the anchor (`span`, `div`, …).
    pub element: String,
}

/// Sanitized transcript body plus its page markers in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptDocument {
    body: String,
    markers: Vec<PageMarker>,
    removed_images: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Before `<body>`; kept only if the document never opens one.
    Preamble,
    Body,
}

impl TranscriptDocument {
    pub fn from_path(path: &Path, options: &TranscriptOptions) -> Result<Self> {
        let html = fs::read_to_string(path).map_err(|source| TranscriptError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&html, options)
    }

    pub fn parse(html: &str, options: &TranscriptOptions) -> Result<Self> {
        let mut reader = Reader::from_str(html);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.expand_empty_elements = false;

        let mut writer = Writer::new(Vec::with_capacity(html.len()));
        let mut section = Section::Preamble;
        let mut markers = Vec::new();
        let mut removed_images = 0usize;

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    return Err(TranscriptError::Markup {
                        position: u64::try_from(reader.error_position()).unwrap_or(u64::MAX),
                        message: err.to_string(),
                    });
                }
            };
            match &event {
                Event::Eof => break,
                Event::Start(start) if section == Section::Preamble && is_tag(start, "body") => {
                    // Everything before the body is head matter.
                    section = Section::Body;
                    writer = Writer::new(Vec::with_capacity(html.len()));
                    markers.clear();
                    removed_images = 0;
                    continue;
                }
                Event::End(end)
                    if section == Section::Body
                        && end.local_name().as_ref().eq_ignore_ascii_case(b"body") =>
                {
                    break;
                }
                Event::Start(start) | Event::Empty(start) => {
                    if is_tag(start, "img") && has_class(start, &options.page_image_class) {
                        removed_images += 1;
                        continue;
                    }
                    if has_class(start, &options.page_marker_class)
                        && let Some(id) = attribute(start, "id").filter(|id| !id.is_empty())
                    {
                        markers.push(PageMarker {
                            id,
                            element: tag_name(start),
                        });
                    }
                }
                // `img` is a void element; a closing tag has nothing to close.
                Event::End(end) if end.local_name().as_ref().eq_ignore_ascii_case(b"img") => {
                    continue;
                }
                Event::DocType(_) | Event::Decl(_) | Event::PI(_) => continue,
                _ => {}
            }
            writer
                .write_event(event)
                .map_err(|err| TranscriptError::Write(err.to_string()))?;
        }

        let body = String::from_utf8(writer.into_inner())?;
        debug!(
            markers = markers.len(),
            removed_images,
            bytes = body.len(),
            "parsed transcript"
        );
        Ok(Self {
            body,
            markers,
            removed_images,
        })
    }

    /// Sanitized inner HTML of the body.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }

    /// Page-boundary markers in document order.
    pub fn markers(&self) -> &[PageMarker] {
        &self.markers
    }

    /// Whether an anchor for `id` exists, i.e. whether scrolling to it can work.
    pub fn has_marker(&self, id: &str) -> bool {
        self.markers.iter().any(|marker| marker.id == id)
    }

    /// Number of page thumbnails removed.
    pub fn removed_images(&self) -> usize {
        self.removed_images
    }
}

fn tag_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).to_ascii_lowercase()
}

fn is_tag(start: &BytesStart<'_>, name: &str) -> bool {
    start
        .local_name()
        .as_ref()
        .eq_ignore_ascii_case(name.as_bytes())
}

fn attribute(start: &BytesStart<'_>, key: &str) -> Option<String> {
    start
        .html_attributes()
        .flatten()
        .find(|attr| attr.key.as_ref().eq_ignore_ascii_case(key.as_bytes()))
        .map(|attr| String::from_utf8_lossy(&attr.value).trim().to_string())
}

fn has_class(start: &BytesStart<'_>, class: &str) -> bool {
    attribute(start, "class")
        .is_some_and(|classes| classes.split_whitespace().any(|name| name == class))
}
