use tracing::info;

use crate::sanitize::{sanitize, PLACEHOLDER};

pub const DEFAULT_VIEW_NAME: &str = "android.view.View";

const DOT_REPLACED: [char; 4] = ['$', '@', '#', '&'];

// U+02CB and U+02CA show up in some vendor class names and break tag parsing.
const STRIPPED_MARKS: [char; 2] = ['\u{02CB}', '\u{02CA}'];

/// Maps a raw class name onto a tag name that is safe to serialize and
/// never blank.
pub fn clean_tag_name(name: &str) -> String {
    if is_blank(name) {
        return DEFAULT_VIEW_NAME.to_string();
    }

    let replaced: String = name
        .chars()
        .filter_map(|c| {
            if DOT_REPLACED.contains(&c) {
                Some('.')
            } else if STRIPPED_MARKS.contains(&c) || is_pattern_whitespace(c) {
                None
            } else {
                Some(c)
            }
        })
        .collect();

    let filtered: String = sanitize(&replaced)
        .chars()
        .filter(|c| *c != PLACEHOLDER)
        .collect();
    let fixed = trim_dots(&collapse_dots(&filtered)).to_string();

    if fixed != name {
        info!(from = %name, to = %fixed, "rewrote xml tag name");
    }

    if is_blank(&fixed) {
        DEFAULT_VIEW_NAME.to_string()
    } else {
        fixed
    }
}

fn is_blank(value: &str) -> bool {
    value.chars().all(char::is_whitespace)
}

// `\s` in the classic regex sense, vertical tab included.
fn is_pattern_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{B}' | '\u{C}' | '\r')
}

fn collapse_dots(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '.' && out.ends_with('.') {
            continue;
        }
        out.push(c);
    }
    out
}

fn trim_dots(value: &str) -> &str {
    let value = value.strip_prefix('.').unwrap_or(value);
    value.strip_suffix('.').unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_class_name_is_unchanged() {
        assert_eq!(
            clean_tag_name("android.widget.FrameLayout"),
            "android.widget.FrameLayout"
        );
    }

    #[test]
    fn blank_names_fall_back_to_default() {
        assert_eq!(clean_tag_name(""), DEFAULT_VIEW_NAME);
        assert_eq!(clean_tag_name("   \t"), DEFAULT_VIEW_NAME);
    }

    #[test]
    fn special_characters_become_dots() {
        assert_eq!(clean_tag_name("com.foo$Bar@1"), "com.foo.Bar.1");
        assert_eq!(clean_tag_name("a#b&c"), "a.b.c");
    }

    #[test]
    fn dot_runs_collapse() {
        assert_eq!(clean_tag_name("a..b...c"), "a.b.c");
        assert_eq!(clean_tag_name("Outer$$Inner"), "Outer.Inner");
    }

    #[test]
    fn leading_and_trailing_dots_are_stripped() {
        assert_eq!(clean_tag_name(".a.b."), "a.b");
        assert_eq!(clean_tag_name("$$a$$"), "a");
    }

    #[test]
    fn whitespace_and_marks_are_removed() {
        assert_eq!(clean_tag_name("my View\tClass"), "myViewClass");
        assert_eq!(clean_tag_name("com.vendor\u{02CB}Widget\u{02CA}"), "com.vendorWidget");
    }

    #[test]
    fn illegal_characters_are_dropped_not_replaced() {
        assert_eq!(clean_tag_name("android.widget\u{1}.Text\u{FFFF}View"), "android.widget.TextView");
    }

    #[test]
    fn literal_question_marks_are_dropped() {
        assert_eq!(clean_tag_name("weird?name"), "weirdname");
    }

    #[test]
    fn names_that_clean_to_nothing_use_default() {
        assert_eq!(clean_tag_name("$@#&"), DEFAULT_VIEW_NAME);
        assert_eq!(clean_tag_name("\u{2}\u{3}"), DEFAULT_VIEW_NAME);
        assert_eq!(clean_tag_name("."), DEFAULT_VIEW_NAME);
    }

    #[test]
    fn cleaning_is_deterministic() {
        let raw = "com.app$Inner@@View";
        assert_eq!(clean_tag_name(raw), clean_tag_name(raw));
    }
}
