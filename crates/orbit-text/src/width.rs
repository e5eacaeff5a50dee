#![forbid(unsafe_code)]

//! Display width helpers.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Marker painted in the last column of truncated text.
pub const ELLIPSIS: char = '…';

/// Calculate the display width of text in cells.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Longest prefix of `text` that fits in `max_width` cells, and its width.
///
/// Never splits a grapheme cluster.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> (&str, usize) {
    let mut width = 0;
    for (idx, grapheme) in text.grapheme_indices(true) {
        let gw = grapheme.width();
        if width + gw > max_width {
            return (&text[..idx], width);
        }
        width += gw;
    }
    (text, width)
}

/// Fit `text` into `max_width` cells, ending in [`ELLIPSIS`] when it had to be cut.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(text) <= max_width {
        return Cow::Borrowed(text);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }
    let (head, _) = truncate_to_width(text, max_width - 1);
    let mut out = String::with_capacity(head.len() + ELLIPSIS.len_utf8());
    out.push_str(head);
    out.push(ELLIPSIS);
    Cow::Owned(out)
}
