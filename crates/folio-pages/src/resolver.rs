//! Navigation between display labels and internal page ids.

use folio_model::{PageEntry, PageId};
use tracing::trace;

use crate::index::PageIndex;
use crate::numbering::{is_arabic_number, is_roman_literal, leading_integer};

/// Outcome of resolving a user-facing page token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Token matched a roman label, ignoring case.
    RomanLabel(PageId),
    /// Token is a number equal to an arabic label (`"07"` matches `"7"`).
    ArabicLabel(PageId),
    /// Token is a number that matched no arabic label but fits in the roman
    /// range; it was taken as the n-th roman page, not as a roman value.
    RomanOrdinal { ordinal: usize, id: PageId },
    /// Token is the number zero.
    OutOfRange,
    /// Nothing matched.
    NotFound,
}

impl Resolution {
    pub fn page_id(&self) -> Option<&PageId> {
        match self {
            Self::RomanLabel(id) | Self::ArabicLabel(id) | Self::RomanOrdinal { id, .. } => {
                Some(id)
            }
            Self::OutOfRange | Self::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.page_id().is_some()
    }

    pub fn describe(&self) -> String {
        match self {
            Self::RomanLabel(id) => format!("roman label -> {id}"),
            Self::ArabicLabel(id) => format!("arabic label -> {id}"),
            Self::RomanOrdinal { ordinal, id } => format!("roman ordinal #{ordinal} -> {id}"),
            Self::OutOfRange => "out of range".to_string(),
            Self::NotFound => "not found".to_string(),
        }
    }
}

impl PageIndex {
    /// Display label for an id, or the id itself when it is not indexed.
    pub fn display_for<'a>(&'a self, id: &'a str) -> &'a str {
        self.entry(id).map_or(id, |entry| entry.label.as_str())
    }

    /// Resolve a display token without any fallback policy.
    pub fn resolve(&self, token: &str) -> Resolution {
        let resolution = self.resolve_inner(token);
        trace!(token, outcome = %resolution.describe(), "resolved page token");
        resolution
    }

    fn resolve_inner(&self, token: &str) -> Resolution {
        if is_roman_literal(token) {
            return self
                .roman_entries()
                .find(|entry| entry.label.eq_ignore_ascii_case(token))
                .map_or(Resolution::NotFound, |entry| {
                    Resolution::RomanLabel(entry.id.clone())
                });
        }
        if !is_arabic_number(token) {
            return Resolution::NotFound;
        }
        let Ok(number) = token.parse::<u64>() else {
            return Resolution::NotFound;
        };
        if number == 0 {
            return Resolution::OutOfRange;
        }
        if let Some(entry) = self
            .arabic_entries()
            .find(|entry| leading_integer(&entry.label) == Some(number))
        {
            return Resolution::ArabicLabel(entry.id.clone());
        }
        match usize::try_from(number) {
            Ok(ordinal) if ordinal <= self.roman_count() => self
                .roman_entries()
                .nth(ordinal - 1)
                .map_or(Resolution::NotFound, |entry| Resolution::RomanOrdinal {
                    ordinal,
                    id: entry.id.clone(),
                }),
            _ => Resolution::NotFound,
        }
    }

    /// Resolve a display token the way the reader's page-jump controls do.
    ///
    /// Unmatched tokens land on the first page; zero yields `None`. Use
    /// [`PageIndex::resolve`] to tell a real match from the fallback.
    pub fn internal_for(&self, token: &str) -> Option<PageId> {
        match self.resolve(token) {
            Resolution::RomanLabel(id)
            | Resolution::ArabicLabel(id)
            | Resolution::RomanOrdinal { id, .. } => Some(id),
            Resolution::OutOfRange => None,
            Resolution::NotFound => self.first().map(|entry| entry.id.clone()),
        }
    }

    /// Page before `id`; `None` on the first page or for an unknown id.
    pub fn previous(&self, id: &str) -> Option<&PageEntry> {
        let pos = self.position(id)?;
        pos.checked_sub(1).and_then(|prev| self.get(prev))
    }

    /// Page after `id`; `None` on the last page.
    ///
    /// An id that is not indexed counts as sitting before the first page, so
    /// stepping forward from it lands on page one.
    pub fn next(&self, id: &str) -> Option<&PageEntry> {
        match self.position(id) {
            Some(pos) => self.get(pos + 1),
            None => self.first(),
        }
    }

    /// One-based position of a roman page among the roman pages.
    pub fn roman_ordinal(&self, id: &str) -> Option<usize> {
        let target = self.entry(id).filter(|entry| entry.is_roman())?;
        self.roman_entries()
            .position(|entry| entry.id == target.id)
            .map(|pos| pos + 1)
    }
}
