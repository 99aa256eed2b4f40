//! XML 1.0 character filtering.
//!
//! Legal characters are `#x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]`.
//! Anything else is replaced with [`PLACEHOLDER`].

use std::borrow::Cow;

pub const PLACEHOLDER: char = '?';

pub fn is_legal_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}'
            | '\u{A}'
            | '\u{D}'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Replaces every character outside the XML 1.0 range with `?`.
/// Borrows the input when nothing needs replacing.
pub fn sanitize(value: &str) -> Cow<'_, str> {
    if value.chars().all(is_legal_xml_char) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(
        value
            .chars()
            .map(|c| if is_legal_xml_char(c) { c } else { PLACEHOLDER })
            .collect(),
    )
}

/// Absent input yields an empty string.
pub fn safe_char_seq_to_string(value: Option<&str>) -> String {
    value.map(|v| sanitize(v).into_owned()).unwrap_or_default()
}
