//! Property-based invariant tests for word-wrap.
//!
//! 1. A produced line wider than the target is a single whitespace-free token.
//! 2. No produced line has leading or trailing whitespace.
//! 3. Wrapping never drops or reorders non-whitespace characters.
//! 4. Every range slices the source on char boundaries and its stored width
//!    matches the measured width.
//! 5. Wrapping is a fixed point: re-wrapping a wrapped line changes nothing.

use orbit_text::{display_width, wrap_ranges};
use proptest::prelude::*;

fn text_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z ,.;!?\\-\n\u{4E2D}]{0,80}").expect("valid regex")
}

fn non_space(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

proptest! {
    #[test]
    fn overlong_lines_are_single_tokens(text in text_strategy(), width in 1usize..30) {
        for range in wrap_ranges(&text, width) {
            let line = range.slice(&text);
            if range.width > width {
                prop_assert!(!line.contains(char::is_whitespace), "line {:?} width {}", line, width);
            }
        }
    }

    #[test]
    fn lines_are_trimmed(text in text_strategy(), width in 1usize..30) {
        for range in wrap_ranges(&text, width) {
            let line = range.slice(&text);
            prop_assert_eq!(line, line.trim());
        }
    }

    #[test]
    fn content_is_preserved(text in text_strategy(), width in 1usize..30) {
        let joined: String = wrap_ranges(&text, width)
            .iter()
            .map(|r| r.slice(&text))
            .collect();
        prop_assert_eq!(non_space(&joined), non_space(&text));
    }

    #[test]
    fn ranges_are_valid(text in text_strategy(), width in 0usize..30) {
        for range in wrap_ranges(&text, width) {
            prop_assert!(text.is_char_boundary(range.start));
            prop_assert!(text.is_char_boundary(range.end()));
            prop_assert_eq!(range.width, display_width(range.slice(&text)));
        }
    }

    #[test]
    fn rewrap_is_fixed_point(text in text_strategy(), width in 1usize..30) {
        for range in wrap_ranges(&text, width) {
            let line = range.slice(&text);
            let again: Vec<&str> = wrap_ranges(line, width).iter().map(|r| r.slice(line)).collect();
            prop_assert_eq!(again, vec![line]);
        }
    }
}
