//! Page entries and their display classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ModelError, PageId};

/// Numbering system a page label belongs to.
///
/// Front matter is usually numbered with roman numerals and body text with
/// arabic numbers. The classification is purely syntactic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    Roman,
    Arabic,
}

impl DisplayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roman => "roman",
            Self::Arabic => "arabic",
        }
    }

    /// Human-readable name used in page-jump controls.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Roman => "Roman",
            Self::Arabic => "Arabic",
        }
    }

    pub fn is_roman(&self) -> bool {
        matches!(self, Self::Roman)
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "roman" => Ok(Self::Roman),
            "arabic" => Ok(Self::Arabic),
            _ => Err(ModelError::UnknownDisplayType(s.to_string())),
        }
    }
}

/// One scanned page: its internal id, how its label is numbered, the label
/// shown to readers and the scan image backing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub id: PageId,
    pub kind: DisplayType,
    pub label: String,
    pub image_path: String,
}

impl PageEntry {
    pub fn is_roman(&self) -> bool {
        self.kind.is_roman()
    }
}

impl fmt::Display for PageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.id, self.kind.label(), self.label)
    }
}
