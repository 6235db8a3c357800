//! Reader settings.
//!
//! Settings are read from a TOML file. Every section and field has a default,
//! so an empty or partial file is valid.
//!
//! ```toml
//! [general]
//! title = "Lyrical Ballads"
//! default_page = "0005"
//!
//! [layout]
//! mobile_breakpoint_px = 1024
//! divider_min_pct = 20.0
//! divider_max_pct = 80.0
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use folio_transcript::{DEFAULT_BAND_RATIO, TranscriptOptions};
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

// =============================================================================
// ROOT SETTINGS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    pub general: GeneralSettings,
    pub layout: LayoutSettings,
    pub scroll: ScrollSettings,
    pub bookmark: BookmarkSettings,
    pub viewer: ViewerSettings,
    pub transcript: TranscriptOptions,
}

impl ReaderSettings {
    /// Load settings from the default path.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::FileRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings: Self = toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::FileWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, self.to_toml()?).map_err(|source| SettingsError::FileWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "Folio", "folio")
            .map(|dirs| dirs.config_dir().join("reader.toml"))
            .unwrap_or_else(|| PathBuf::from("reader.toml"))
    }

    /// Reject values the session cannot work with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let layout = &self.layout;
        if layout.mobile_breakpoint_px <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "layout.mobile_breakpoint_px must be positive, got {}",
                layout.mobile_breakpoint_px
            )));
        }
        if !(0.0..=100.0).contains(&layout.divider_min_pct)
            || !(0.0..=100.0).contains(&layout.divider_max_pct)
            || layout.divider_min_pct >= layout.divider_max_pct
        {
            return Err(SettingsError::Invalid(format!(
                "layout divider band {}..{} must be an increasing range within 0..100",
                layout.divider_min_pct, layout.divider_max_pct
            )));
        }
        if !(layout.divider_min_pct..=layout.divider_max_pct).contains(&layout.divider_initial_pct) {
            return Err(SettingsError::Invalid(format!(
                "layout.divider_initial_pct {} lies outside {}..{}",
                layout.divider_initial_pct, layout.divider_min_pct, layout.divider_max_pct
            )));
        }
        if !(self.scroll.band_ratio > 0.0 && self.scroll.band_ratio <= 1.0) {
            return Err(SettingsError::Invalid(format!(
                "scroll.band_ratio must be in (0, 1], got {}",
                self.scroll.band_ratio
            )));
        }
        Ok(())
    }
}

// =============================================================================
// SECTIONS
// =============================================================================

/// Book-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    pub title: String,
    pub description: String,
    /// Internal id of the page opened first.
    pub default_page: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            title: "Lyrical Ballads".to_string(),
            description: "Lyrical Ballads (1800), facsimile & transcript edition.".to_string(),
            default_page: "0005".to_string(),
        }
    }
}

/// Pane layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Viewports narrower than this use the single-pane layout.
    pub mobile_breakpoint_px: f64,
    /// Transcript pane width, in percent of the viewport.
    pub divider_initial_pct: f64,
    /// Drags at or below this percentage are ignored.
    pub divider_min_pct: f64,
    /// Drags at or above this percentage are ignored.
    pub divider_max_pct: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: 1024.0,
            divider_initial_pct: 60.0,
            divider_min_pct: 20.0,
            divider_max_pct: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// Top fraction of the transcript viewport in which a page marker
    /// becomes the current page.
    pub band_ratio: f64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            band_ratio: DEFAULT_BAND_RATIO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookmarkSettings {
    pub message: String,
    pub duration_ms: u64,
}

impl Default for BookmarkSettings {
    fn default() -> Self {
        Self {
            message: "Page bookmarked for later reading.".to_string(),
            duration_ms: 2500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Prefix joined to mapping image paths to form the tile source URL.
    pub image_prefix: String,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            image_prefix: "/".to_string(),
        }
    }
}

impl ViewerSettings {
    pub fn image_url(&self, image_path: &str) -> String {
        if self.image_prefix.is_empty() {
            return image_path.to_string();
        }
        format!(
            "{}/{}",
            self.image_prefix.trim_end_matches('/'),
            image_path.trim_start_matches('/')
        )
    }
}
