//! Page numbering for scanned books.
//!
//! A scanned volume has one internal id per image (`0001`, `0002`, …) while
//! readers refer to pages by the numbers printed on them: roman numerals in
//! the front matter, arabic numbers in the body. This crate reconciles the
//! two.
//!
//! - [`numbering`]: roman ↔ arabic conversion
//! - [`mapping`]: the label → image path file
//! - [`index`]: ordered [`PageIndex`] built from a mapping
//! - [`resolver`]: label ↔ id lookups and previous/next
//! - [`input`]: page-jump field handling

pub mod error;
pub mod index;
pub mod input;
pub mod mapping;
pub mod numbering;
pub mod resolver;

pub use error::{MappingError, Result};
pub use index::{PageIndex, classify_label, extract_page_id};
pub use input::{PageInputs, PageJump, digits_only, word_chars_only};
pub use mapping::{MappingEntry, PageMapping};
pub use numbering::{MAX_ROMAN, from_roman, is_arabic_number, is_roman_literal, to_roman};
pub use resolver::Resolution;
