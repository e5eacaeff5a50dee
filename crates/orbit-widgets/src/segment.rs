#![forbid(unsafe_code)]

//! Per-row paint nodes.
//!
//! Rendering one row is two passes over a throwaway forest:
//!
//! 1. **Build**: starting from a root segment as wide as the target, each
//!    render node attaches the segments that make up its slice of the row
//!    (see [`Renderable::build_segment_tree`](crate::Renderable::build_segment_tree)).
//! 2. **Paint**: segments are painted in sibling order. Each writes exactly
//!    its declared length; whatever its content does not cover is padded
//!    with spaces in its own resolved style.
//!
//! A segment's style cascades: its final style is the parent's final style
//! overridden by the segment's own style.
//!
//! Content wider than its segment is clipped and ends in `…`.

use std::io::Write;

use orbit_render::RenderTarget;
use orbit_style::TextStyle;
use orbit_text::{ELLIPSIS, truncate_to_width};
use smallvec::SmallVec;

/// What a segment paints before padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentContent<'a> {
    /// Only children, then padding.
    Fill,
    /// A single line of text.
    Text { text: &'a str, width: usize },
    /// Text wrapped in an OSC 8 hyperlink.
    Link {
        text: &'a str,
        width: usize,
        url: &'a str,
    },
}

/// One paint node for one row.
#[derive(Debug, Clone)]
pub struct SegmentRenderer<'a> {
    length: usize,
    content_length: usize,
    final_style: TextStyle,
    content: SegmentContent<'a>,
    children: SmallVec<[Box<SegmentRenderer<'a>>; 4]>,
}

impl<'a> SegmentRenderer<'a> {
    /// Top-level segment covering a whole row.
    pub fn root(length: usize, style: TextStyle) -> Self {
        Self::with_content(length, style, SegmentContent::Fill)
    }

    fn with_content(length: usize, final_style: TextStyle, content: SegmentContent<'a>) -> Self {
        let content_length = match content {
            SegmentContent::Fill => 0,
            SegmentContent::Text { width, .. } | SegmentContent::Link { width, .. } => width,
        };
        Self {
            length,
            content_length,
            final_style,
            content,
            children: SmallVec::new(),
        }
    }

    /// Unattached filler child inheriting this segment's style.
    #[must_use]
    pub fn fill(&self, length: usize, style: TextStyle) -> Self {
        Self::with_content(
            length,
            self.final_style.override_with(style),
            SegmentContent::Fill,
        )
    }

    /// Unattached text child.
    #[must_use]
    pub fn text(&self, text: &'a str, width: usize, length: usize, style: TextStyle) -> Self {
        Self::with_content(
            length,
            self.final_style.override_with(style),
            SegmentContent::Text { text, width },
        )
    }

    /// Unattached hyperlink child.
    #[must_use]
    pub fn link(
        &self,
        text: &'a str,
        width: usize,
        url: &'a str,
        length: usize,
        style: TextStyle,
    ) -> Self {
        Self::with_content(
            length,
            self.final_style.override_with(style),
            SegmentContent::Link { text, width, url },
        )
    }

    /// Append `child` after the existing children.
    pub fn attach(&mut self, child: Self) {
        self.content_length += child.length;
        self.children.push(Box::new(child));
    }

    /// Attach a filler of `length` columns.
    pub fn add_fill(&mut self, length: usize, style: TextStyle) {
        if length > 0 {
            let child = self.fill(length, style);
            self.attach(child);
        }
    }

    /// Declared width in columns.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Columns claimed by content and children so far.
    #[inline]
    pub fn content_length(&self) -> usize {
        self.content_length
    }

    /// Columns not yet claimed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.length.saturating_sub(self.content_length)
    }

    #[inline]
    pub fn final_style(&self) -> TextStyle {
        self.final_style
    }

    #[inline]
    pub fn content(&self) -> SegmentContent<'a> {
        self.content
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = &SegmentRenderer<'a>> {
        self.children.iter().map(|child| &**child)
    }

    /// Paint exactly [`length`](Self::length) columns.
    pub fn paint<W: Write>(&self, target: &mut RenderTarget<W>) {
        self.paint_within(target, self.length);
    }

    fn paint_within<W: Write>(&self, target: &mut RenderTarget<W>, budget: usize) {
        let cols = self.length.min(budget);
        let used = match self.content {
            SegmentContent::Fill => {
                let mut left = cols;
                for child in &self.children {
                    if left == 0 {
                        break;
                    }
                    let take = child.length.min(left);
                    child.paint_within(target, take);
                    left -= take;
                }
                cols - left
            }
            SegmentContent::Text { text, width } => {
                target.set_style(&self.final_style);
                write_clipped(target, text, width, cols)
            }
            SegmentContent::Link { text, width, url } => {
                target.set_style(&self.final_style);
                let opened = target.begin_link(url);
                let used = write_clipped(target, text, width, cols);
                if opened {
                    target.end_link();
                }
                used
            }
        };
        if used < cols {
            target.set_style(&self.final_style);
            target.write_fill(cols - used);
        }
    }
}

/// Write `text` into at most `cols` columns; returns the columns used.
fn write_clipped<W: Write>(
    target: &mut RenderTarget<W>,
    text: &str,
    width: usize,
    cols: usize,
) -> usize {
    if width <= cols {
        target.write_str(text);
        return width;
    }
    if cols == 0 {
        return 0;
    }
    let (head, head_width) = truncate_to_width(text, cols - 1);
    target.write_str(head);
    target.write_char(ELLIPSIS);
    head_width + 1
}
