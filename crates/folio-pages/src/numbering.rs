//! Roman numeral conversion.
//!
//! Output is always lowercase, matching how front-matter page labels are
//! written in the mapping files. Parsing is lenient: case is ignored and
//! characters outside the seven roman symbols are skipped.

use std::sync::LazyLock;

use regex::Regex;

const ROMAN_TABLE: [(i64, &str); 13] = [
    (1000, "m"),
    (900, "cm"),
    (500, "d"),
    (400, "cd"),
    (100, "c"),
    (90, "xc"),
    (50, "l"),
    (40, "xl"),
    (10, "x"),
    (9, "ix"),
    (5, "v"),
    (4, "iv"),
    (1, "i"),
];

static ROMAN_LITERAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[ivxlcdm]+$").expect("Invalid roman literal regex"));

static ARABIC_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("Invalid arabic number regex"));

/// Largest value with a numeral; the table stops at one thousand.
pub const MAX_ROMAN: i64 = 3999;

/// Convert a positive integer to a lowercase roman numeral.
///
/// Returns an empty string outside `1..=MAX_ROMAN`.
pub fn to_roman(n: i64) -> String {
    if !(1..=MAX_ROMAN).contains(&n) {
        return String::new();
    }
    let mut remaining = n;
    let mut out = String::new();
    for (value, symbol) in ROMAN_TABLE {
        while remaining >= value {
            remaining -= value;
            out.push_str(symbol);
        }
    }
    out
}

/// Parse a roman numeral, right to left.
///
/// A symbol smaller than the one seen before it is subtracted. Unknown
/// characters are skipped, so `"x-i"` reads as eleven. Empty input yields
/// `None`; input without any roman symbol yields `Some(0)`.
pub fn from_roman(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    let mut total: i64 = 0;
    let mut previous: i64 = 0;
    for ch in s.chars().rev() {
        let Some(value) = symbol_value(ch) else {
            continue;
        };
        if value < previous {
            total -= value;
        } else {
            total += value;
        }
        previous = value;
    }
    u32::try_from(total).ok()
}

fn symbol_value(ch: char) -> Option<i64> {
    match ch.to_ascii_lowercase() {
        'i' => Some(1),
        'v' => Some(5),
        'x' => Some(10),
        'l' => Some(50),
        'c' => Some(100),
        'd' => Some(500),
        'm' => Some(1000),
        _ => None,
    }
}

/// True when `s` consists only of roman symbols (any case).
///
/// This is a syntactic test: `"mix"` or `"dim"` qualify even though they are
/// not canonical numerals.
pub fn is_roman_literal(s: &str) -> bool {
    ROMAN_LITERAL_REGEX.is_match(s)
}

/// True when `s` is a non-empty run of ASCII digits.
pub fn is_arabic_number(s: &str) -> bool {
    ARABIC_NUMBER_REGEX.is_match(s)
}

/// Leading integer of a label, the way page labels like `"12a"` are compared.
///
/// Leading whitespace and one `+` sign are ignored. Returns `None` when no
/// digit follows or the value overflows.
pub fn leading_integer(s: &str) -> Option<u64> {
    let trimmed = s.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = trimmed
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(trimmed.len(), |(idx, _)| idx);
    trimmed[..end].parse().ok()
}
