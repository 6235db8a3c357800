//! Page mapping file: display label → scan image path.
//!
//! The file is a flat JSON object such as
//! `{ "i": "images/LB_0001.jpg", "1": "images/LB_0009.jpg" }`. Key order carries
//! no meaning; physical order is recovered from the image filenames when the
//! index is built.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::error::{MappingError, Result};

/// One `label → path` pair from a mapping file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub label: String,
    pub path: String,
}

/// Raw page mapping as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMapping {
    entries: Vec<MappingEntry>,
}

impl PageMapping {
    pub fn from_pairs<I, L, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, P)>,
        L: Into<String>,
        P: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(label, path)| MappingEntry {
                label: label.into(),
                path: path.into(),
            })
            .collect();
        Self { entries }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| MappingError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(MappingError::NotAnObject {
                found: json_kind(&value),
            });
        };
        let mut entries = Vec::with_capacity(map.len());
        for (label, path) in map {
            match path {
                Value::String(path) => entries.push(MappingEntry { label, path }),
                other => {
                    return Err(MappingError::NonStringPath {
                        label,
                        found: json_kind(&other),
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Image path for a display label, exactly as written in the file.
    pub fn path_for(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.path.as_str())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_object() {
        let mapping =
            PageMapping::from_json_str(r#"{"i": "img/0001.jpg", "1": "img/0003.jpg"}"#).unwrap();
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.path_for("1"), Some("img/0003.jpg"));
        assert_eq!(mapping.path_for("2"), None);
    }

    #[test]
    fn rejects_array_root() {
        let err = PageMapping::from_json_str(r#"["img/0001.jpg"]"#).unwrap_err();
        assert!(matches!(err, MappingError::NotAnObject { found: "an array" }));
    }

    #[test]
    fn rejects_non_string_path() {
        let err = PageMapping::from_json_str(r#"{"i": 1}"#).unwrap_err();
        match err {
            MappingError::NonStringPath { label, found } => {
                assert_eq!(label, "i");
                assert_eq!(found, "a number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(
            PageMapping::from_json_str("{"),
            Err(MappingError::Json(_))
        ));
    }
}
