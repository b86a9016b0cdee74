//! Lexical-space checks for wire text that generated accessors expose under
//! a narrower type.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_NEGATIVE_INTEGER: Regex = Regex::new(r"^\+?[0-9]+$").unwrap();
}

/// Decode-only parse of a remaining-item count declared as text on the wire.
///
/// Text outside the nonNegativeInteger lexical space reads as absent. The
/// coercion is one-directional: re-encoding always goes through the original
/// string member, never back through this parse.
pub fn parse_remaining_count(text: &str) -> Option<i32> {
    if NON_NEGATIVE_INTEGER.is_match(text) {
        text.trim_start_matches('+').parse().ok()
    } else {
        None
    }
}
