//! Text width and truncation utilities.
//!
//! Every measurement goes through [`UnicodeWidthStr::width`], so a string
//! and the pieces cut from it always agree on their size.

use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

/// Get the visual width of a string in terminal cells.
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Replace control characters (newlines, tabs, escapes) with spaces.
///
/// Borrows when there is nothing to replace.
pub fn single_line(s: &str) -> Cow<'_, str> {
    if s.chars().any(char::is_control) {
        Cow::Owned(
            s.chars()
                .map(|ch| if ch.is_control() { ' ' } else { ch })
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    }
}

/// Truncate a string to `max_width` cells, ending in `…` if anything was cut.
///
/// The result is never wider than `max_width`.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if visual_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut out = String::new();
    let mut used = 0;
    let mut buf = [0u8; 4];
    for ch in s.chars() {
        let w = visual_width(ch.encode_utf8(&mut buf));
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    // Grapheme sequences can measure wider together than char by char.
    while visual_width(&out) > budget {
        out.pop();
    }
    out.push('\u{2026}');
    out
}
