//! Page index built from a mapping file.
//!
//! The index is an immutable value: build it once and hand references to the
//! resolver, the session and the CLI.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use folio_model::{DisplayType, PageEntry, PageId};
use regex::Regex;
use tracing::{debug, warn};

use crate::mapping::{MappingEntry, PageMapping};
use crate::numbering::is_roman_literal;

/// Four-digit sequence number right before the image extension.
static PAGE_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{4})\.(?:jpe?g|png|tiff?|webp)$").expect("Invalid page number regex")
});

/// Any digit run before the image extension, used only for ordering.
static SORT_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\.(?:jpe?g|png|tiff?|webp)$").expect("Invalid sort key regex")
});

/// Ordered lookup table of scanned pages.
#[derive(Debug, Clone, Default)]
pub struct PageIndex {
    entries: Vec<PageEntry>,
    positions: HashMap<PageId, usize>,
    roman_count: usize,
    skipped: Vec<String>,
}

impl PageIndex {
    /// Build the index from a raw mapping.
    ///
    /// Entries whose image path carries no four-digit page number are left
    /// out and reported by [`PageIndex::skipped`]. When two paths yield the
    /// same id the later one (in file-number order) wins.
    pub fn build(mapping: &PageMapping) -> Self {
        let mut sorted: Vec<&MappingEntry> = mapping.entries().iter().collect();
        sorted.sort_by_key(|entry| sort_key(&entry.path));

        let mut by_id: BTreeMap<PageId, PageEntry> = BTreeMap::new();
        let mut skipped = Vec::new();
        for item in sorted {
            let Some(id) = extract_page_id(&item.path) else {
                warn!(label = %item.label, path = %item.path, "mapping entry has no page number");
                skipped.push(item.label.clone());
                continue;
            };
            let entry = PageEntry {
                id: id.clone(),
                kind: classify_label(&item.label),
                label: item.label.clone(),
                image_path: item.path.clone(),
            };
            if let Some(replaced) = by_id.insert(id, entry) {
                warn!(
                    page = %replaced.id,
                    replaced = %replaced.label,
                    by = %item.label,
                    "duplicate page number in mapping"
                );
            }
        }

        let index = Self::from_entries(by_id.into_values().collect(), skipped);
        debug!(
            pages = index.len(),
            roman = index.roman_count(),
            arabic = index.arabic_count(),
            skipped = index.skipped.len(),
            "built page index"
        );
        index
    }

    fn from_entries(entries: Vec<PageEntry>, skipped: Vec<String>) -> Self {
        let positions = entries
            .iter()
            .enumerate()
            .map(|(pos, entry)| (entry.id.clone(), pos))
            .collect();
        let roman_count = entries.iter().filter(|entry| entry.is_roman()).count();
        Self {
            entries,
            positions,
            roman_count,
            skipped,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in page order.
    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageEntry> {
        self.entries.iter()
    }

    /// Page ids in page order.
    pub fn ids(&self) -> impl Iterator<Item = &PageId> {
        self.entries.iter().map(|entry| &entry.id)
    }

    pub fn first(&self) -> Option<&PageEntry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&PageEntry> {
        self.entries.last()
    }

    /// Zero-based position of an id, `None` when it is not indexed.
    pub fn position(&self, id: &str) -> Option<usize> {
        let id = PageId::new(id).ok()?;
        self.positions.get(&id).copied()
    }

    pub fn entry(&self, id: &str) -> Option<&PageEntry> {
        self.position(id).map(|pos| &self.entries[pos])
    }

    pub fn get(&self, pos: usize) -> Option<&PageEntry> {
        self.entries.get(pos)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Number of roman-labelled pages. Used as the range hint of the roman field.
    pub fn roman_count(&self) -> usize {
        self.roman_count
    }

    /// Number of arabic-labelled pages. Used as the range hint of the arabic field.
    pub fn arabic_count(&self) -> usize {
        self.entries.len() - self.roman_count
    }

    /// Labels dropped because their image path had no page number.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Roman-labelled entries in page order.
    pub fn roman_entries(&self) -> impl Iterator<Item = &PageEntry> {
        self.entries.iter().filter(|entry| entry.is_roman())
    }

    /// Arabic-labelled entries in page order.
    pub fn arabic_entries(&self) -> impl Iterator<Item = &PageEntry> {
        self.entries.iter().filter(|entry| !entry.is_roman())
    }
}

impl<'a> IntoIterator for &'a PageIndex {
    type Item = &'a PageEntry;
    type IntoIter = std::slice::Iter<'a, PageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Extract the internal page id from an image path (`.../LB_0007.jpg` → `0007`).
pub fn extract_page_id(path: &str) -> Option<PageId> {
    let captures = PAGE_NUMBER_REGEX.captures(path)?;
    PageId::new(captures.get(1)?.as_str()).ok()
}

/// Classify a display label as roman or arabic by its spelling alone.
pub fn classify_label(label: &str) -> DisplayType {
    if is_roman_literal(label) {
        DisplayType::Roman
    } else {
        DisplayType::Arabic
    }
}

fn sort_key(path: &str) -> u64 {
    SORT_KEY_REGEX
        .captures(path)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_four_digit_suffix() {
        assert_eq!(
            extract_page_id("images/LB00-1_0007.jpg").map(|id| id.to_string()),
            Some("0007".to_string())
        );
        assert_eq!(
            extract_page_id("scans/p0012.PNG").map(|id| id.to_string()),
            Some("0012".to_string())
        );
        assert_eq!(
            extract_page_id("scans/p10012.jpg").map(|id| id.to_string()),
            Some("0012".to_string())
        );
        assert!(extract_page_id("images/007.jpg").is_none());
        assert!(extract_page_id("images/cover.jpg").is_none());
        assert!(extract_page_id("images/0007.gif").is_none());
    }

    #[test]
    fn classifies_by_spelling() {
        assert_eq!(classify_label("xiv"), DisplayType::Roman);
        assert_eq!(classify_label("XIV"), DisplayType::Roman);
        assert_eq!(classify_label("mix"), DisplayType::Roman);
        assert_eq!(classify_label("12"), DisplayType::Arabic);
        assert_eq!(classify_label("Title"), DisplayType::Arabic);
    }

    #[test]
    fn sort_key_defaults_to_zero() {
        assert_eq!(sort_key("a/0042.jpg"), 42);
        assert_eq!(sort_key("a/cover.jpg"), 0);
    }

    #[test]
    fn skips_and_reports_unnumbered_paths() {
        let mapping = PageMapping::from_pairs([
            ("cover", "images/cover.jpg"),
            ("i", "images/LB_0001.jpg"),
        ]);
        let index = PageIndex::build(&mapping);
        assert_eq!(index.len(), 1);
        assert_eq!(index.skipped(), ["cover".to_string()]);
    }

    #[test]
    fn later_duplicate_replaces_earlier() {
        let mapping = PageMapping::from_pairs([
            ("i", "a/LB_0001.jpg"),
            ("ii", "b/LB_0001.jpg"),
        ]);
        let index = PageIndex::build(&mapping);
        assert_eq!(index.len(), 1);
        assert_eq!(index.entry("0001").map(|e| e.label.as_str()), Some("ii"));
    }

    #[test]
    fn orders_by_page_number_not_key_order() {
        let mapping = PageMapping::from_pairs([
            ("2", "images/LB_0011.jpg"),
            ("ii", "images/LB_0002.jpg"),
            ("1", "images/LB_0010.jpg"),
            ("i", "images/LB_0001.jpg"),
        ]);
        let index = PageIndex::build(&mapping);
        let ids: Vec<&str> = index.ids().map(PageId::as_str).collect();
        assert_eq!(ids, vec!["0001", "0002", "0010", "0011"]);
        assert_eq!(index.position("0010"), Some(2));
        assert_eq!(index.position("10"), None);
        assert_eq!(index.position("abc"), None);
    }
}
