//! Page-jump inputs.
//!
//! The reader exposes three jump fields: a roman field that takes the
//! ordinal of a front-matter page, an arabic field that takes a body page
//! number, and a single combined field on narrow screens. Each field filters
//! what the user types and turns a submission into a token for
//! [`PageIndex::internal_for`].

use crate::index::PageIndex;
use crate::numbering::to_roman;

/// Keep ASCII digits only.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Keep ASCII letters, digits and underscores.
pub fn word_chars_only(input: &str) -> String {
    input
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
        .collect()
}

/// A submitted page-jump field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageJump {
    /// Ordinal typed into the roman field (`3` → `iii`).
    Roman(String),
    /// Number typed into the arabic field.
    Arabic(String),
    /// Free text typed into the combined field.
    Combined(String),
}

impl PageJump {
    /// Display token to resolve, or `None` when the field is empty.
    pub fn token(&self) -> Option<String> {
        match self {
            Self::Roman(raw) => {
                let digits = digits_only(raw);
                if digits.is_empty() {
                    return None;
                }
                // Ordinals past the numeral range, or past i64, convert to nothing.
                let ordinal = digits.parse::<i64>().unwrap_or(0);
                Some(to_roman(ordinal))
            }
            Self::Arabic(raw) => Some(digits_only(raw)).filter(|digits| !digits.is_empty()),
            Self::Combined(raw) => Some(word_chars_only(raw)).filter(|text| !text.is_empty()),
        }
    }
}

/// Values shown in the roman and arabic fields for the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInputs {
    pub roman: String,
    pub arabic: String,
}

impl PageInputs {
    /// Prefill for `id`: the roman ordinal on a roman page, the label on an
    /// arabic page, both empty when the page is unknown.
    pub fn for_page(index: &PageIndex, id: &str) -> Self {
        let Some(entry) = index.entry(id) else {
            return Self::default();
        };
        if entry.is_roman() {
            Self {
                roman: index
                    .roman_ordinal(id)
                    .map(|ordinal| ordinal.to_string())
                    .unwrap_or_default(),
                arabic: String::new(),
            }
        } else {
            Self {
                roman: String::new(),
                arabic: entry.label.clone(),
            }
        }
    }

    /// Text for the combined field, which shows whichever field is filled.
    pub fn combined(&self) -> &str {
        if self.arabic.is_empty() {
            &self.roman
        } else {
            &self.arabic
        }
    }
}
