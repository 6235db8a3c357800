//! Roman numeral conversion properties.

use folio_pages::{MAX_ROMAN, from_roman, to_roman};
use proptest::prelude::*;

#[test]
fn round_trips_every_supported_value() {
    for n in 1..=3999u32 {
        let roman = to_roman(i64::from(n));
        assert_eq!(from_roman(&roman), Some(n), "round trip failed for {n} ({roman})");
    }
}

#[test]
fn non_positive_values_render_empty() {
    assert_eq!(to_roman(0), "");
    assert_eq!(to_roman(-5), "");
    assert_eq!(to_roman(i64::MIN), "");
}

#[test]
fn values_past_the_table_render_empty() {
    assert_eq!(to_roman(MAX_ROMAN + 1), "");
    assert_eq!(to_roman(999_999_999_999_999_999), "");
    assert_eq!(to_roman(i64::MAX), "");
}

#[test]
fn output_is_lowercase() {
    for n in [4, 49, 944, 2024, 3888] {
        let roman = to_roman(n);
        assert_eq!(roman, roman.to_lowercase());
    }
}

proptest! {
    #[test]
    fn parsing_ignores_case(n in 1i64..=3999) {
        let roman = to_roman(n);
        prop_assert_eq!(from_roman(&roman.to_uppercase()), from_roman(&roman));
    }

    #[test]
    fn canonical_output_uses_no_more_than_three_repeats(n in 1i64..=3999) {
        let roman = to_roman(n);
        for symbol in ["iiii", "xxxx", "cccc", "vv", "ll", "dd"] {
            prop_assert!(!roman.contains(symbol), "{} contains {}", roman, symbol);
        }
    }

    #[test]
    fn unknown_characters_are_skipped(n in 1i64..=3999, noise in "[0-9 .-]{0,4}") {
        let roman = to_roman(n);
        let noisy = format!("{noise}{roman}{noise}");
        prop_assert_eq!(from_roman(&noisy), u32::try_from(n).ok());
    }
}
