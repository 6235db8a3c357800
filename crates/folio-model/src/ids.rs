#![deny(unsafe_code)]

use std::cmp::Ordering;
use std::fmt;

use crate::ModelError;

/// Internal page identifier taken from a scan filename (e.g. `0007`).
///
/// The zero padding is kept verbatim because transcript anchors use the same
/// text. Ordering follows the numeric value, so `0010` sorts after `0009` and
/// `7` equals `0007` only in position, never in identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageId(String);

impl PageId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ModelError::InvalidPageId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id, `None` when it does not fit in a `u64`.
    pub fn number(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    fn significant_digits(&self) -> &str {
        let stripped = self.0.trim_start_matches('0');
        if stripped.is_empty() { "0" } else { stripped }
    }
}

impl Ord for PageId {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.significant_digits(), other.significant_digits());
        a.len()
            .cmp(&b.len())
            .then_with(|| a.cmp(b))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for PageId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AsRef<str> for PageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PageId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for PageId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PageId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_digits() {
        assert!(PageId::new("").is_err());
        assert!(PageId::new("  ").is_err());
        assert!(PageId::new("00a1").is_err());
        assert!(PageId::new("-001").is_err());
    }

    #[test]
    fn keeps_zero_padding() {
        let id = PageId::new(" 0007 ").unwrap();
        assert_eq!(id.as_str(), "0007");
        assert_eq!(id.number(), Some(7));
    }

    #[test]
    fn orders_numerically() {
        let mut ids: Vec<PageId> = ["0010", "0002", "9", "0001", "100"]
            .into_iter()
            .map(|s| PageId::new(s).unwrap())
            .collect();
        ids.sort();
        let sorted: Vec<&str> = ids.iter().map(PageId::as_str).collect();
        assert_eq!(sorted, vec!["0001", "0002", "9", "0010", "100"]);
    }

    #[test]
    fn padding_breaks_ties_without_equality() {
        let a = PageId::new("0007").unwrap();
        let b = PageId::new("7").unwrap();
        assert_ne!(a, b);
        assert_eq!(a.number(), b.number());
        assert_ne!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn serde_rejects_invalid() {
        let ok: PageId = serde_json::from_str("\"0003\"").unwrap();
        assert_eq!(ok.as_str(), "0003");
        assert!(serde_json::from_str::<PageId>("\"iii\"").is_err());
    }
}
