#![forbid(unsafe_code)]

//! The render tree.
//!
//! [`Renderable`] is a closed set of immutable node kinds, each behind an
//! `Arc`, so trees are cheap to clone, share structure, and can be handed to
//! the animation thread as-is. Composition never mutates an existing node.

use std::cmp::Reverse;
use std::io::Write;
use std::sync::Arc;

use orbit_core::geometry::Padding;
use orbit_render::{RenderCaps, RenderTarget};
use orbit_style::TextStyle;
use orbit_text::MIN_WIDTH;

use crate::collapsable::Collapsable;
use crate::content_box::ContentBox;
use crate::hyperlink::HyperLink;
use crate::segment::SegmentRenderer;
use crate::stack::{HorizontalContent, VerticalContent};
use crate::text_block::TextBlock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Renderable {
    Text(Arc<TextBlock>),
    Box(Arc<ContentBox>),
    Horizontal(Arc<HorizontalContent>),
    Vertical(Arc<VerticalContent>),
    Link(Arc<HyperLink>),
    Collapsable(Arc<Collapsable>),
}

impl Renderable {
    /// Unstyled text, trimmed.
    pub fn text(text: &str) -> Self {
        Self::from(TextBlock::from_text(text))
    }

    pub fn styled(text: &str, style: TextStyle) -> Self {
        Self::from(TextBlock::styled(text, style))
    }

    /// A zero-sized node; composing with it is a no-op.
    pub fn empty() -> Self {
        Self::Vertical(Arc::new(VerticalContent::default()))
    }

    pub fn width(&self) -> usize {
        match self {
            Self::Text(n) => n.width(),
            Self::Box(n) => n.width(),
            Self::Horizontal(n) => n.width(),
            Self::Vertical(n) => n.width(),
            Self::Link(n) => n.width(),
            Self::Collapsable(n) => n.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Self::Text(n) => n.height(),
            Self::Box(n) => n.height(),
            Self::Horizontal(n) => n.height(),
            Self::Vertical(n) => n.height(),
            Self::Link(n) => n.height(),
            Self::Collapsable(n) => n.height(),
        }
    }

    /// True when the node covers no cells.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Same node instance, not merely equal content.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Arc::ptr_eq(a, b),
            (Self::Box(a), Self::Box(b)) => Arc::ptr_eq(a, b),
            (Self::Horizontal(a), Self::Horizontal(b)) => Arc::ptr_eq(a, b),
            (Self::Vertical(a), Self::Vertical(b)) => Arc::ptr_eq(a, b),
            (Self::Link(a), Self::Link(b)) => Arc::ptr_eq(a, b),
            (Self::Collapsable(a), Self::Collapsable(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // Composition
    // ------------------------------------------------------------------

    /// `self` followed by `other` on the same rows.
    #[must_use]
    pub fn add_right(self, other: Renderable) -> Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        Self::from(HorizontalContent::new([self, other]))
    }

    /// `other` followed by `self` on the same rows.
    #[must_use]
    pub fn add_left(self, other: Renderable) -> Self {
        other.add_right(self)
    }

    /// `other` on the rows below `self`.
    #[must_use]
    pub fn add_below(self, other: Renderable) -> Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        Self::from(VerticalContent::new([self, other]))
    }

    /// Wrap in a box with `padding`. Empty nodes are returned unchanged.
    #[must_use]
    pub fn boxed(self, padding: impl Into<Padding>) -> Self {
        if self.is_empty() {
            return self;
        }
        Self::from(ContentBox::new(self).padding(padding))
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Re-wrap text so the tree fits in `width` columns where possible.
    ///
    /// Widths below [`MIN_WIDTH`] are refused and the tree is returned as is.
    /// Nodes that already fit are shared, not copied.
    #[must_use]
    pub fn fit_to_width(&self, width: usize) -> Self {
        if width < MIN_WIDTH {
            orbit_core::debug!(width, min = MIN_WIDTH, "refusing to reflow below minimum width");
            return self.clone();
        }
        self.reflow(width)
    }

    fn reflow(&self, width: usize) -> Self {
        if width == 0 || self.width() <= width {
            return self.clone();
        }
        match self {
            Self::Text(block) => Self::Text(block.set_text_width(width)),
            Self::Box(b) => {
                let edges = b.horizontal_edges();
                match width.checked_sub(edges) {
                    Some(inner) if inner > 0 => {
                        Self::from(b.with_child(b.child().reflow(inner)))
                    }
                    _ => self.clone(),
                }
            }
            Self::Horizontal(h) => reflow_horizontal(h, width),
            Self::Vertical(v) => {
                Self::from(VerticalContent::new(v.children().iter().map(|c| c.reflow(width))))
            }
            Self::Link(_) => self.clone(),
            Self::Collapsable(c) => Self::from(
                Collapsable::new(c.summary().reflow(width), c.content().reflow(width))
                    .collapsed(c.is_collapsed()),
            ),
        }
    }

    // ------------------------------------------------------------------
    // Painting
    // ------------------------------------------------------------------

    /// Attach the segments for `row` of this node to `parent`.
    ///
    /// `actual_height` is the number of rows the node is asked to fill, which
    /// may exceed its own height when a taller sibling sits next to it.
    pub fn build_segment_tree<'a>(
        &'a self,
        row: usize,
        parent: &mut SegmentRenderer<'a>,
        actual_height: usize,
    ) {
        match self {
            Self::Text(n) => n.build_segment_tree(row, parent),
            Self::Box(n) => n.build_segment_tree(row, parent, actual_height),
            Self::Horizontal(n) => n.build_segment_tree(row, parent, actual_height),
            Self::Vertical(n) => n.build_segment_tree(row, parent),
            Self::Link(n) => n.build_segment_tree(row, parent),
            Self::Collapsable(n) => n.build_segment_tree(row, parent),
        }
    }

    /// Paint exactly `width` columns of `row`.
    pub fn paint_row<W: Write>(&self, row: usize, width: usize, target: &mut RenderTarget<W>) {
        let _span = orbit_core::debug_span!("segment_row", row, width).entered();
        let mut root = SegmentRenderer::root(width, TextStyle::UNSPECIFIED);
        self.build_segment_tree(row, &mut root, self.height());
        root.paint(target);
    }

    /// Every row as plain text, each exactly `width` columns.
    pub fn plain_rows(&self, width: usize) -> Vec<String> {
        (0..self.height())
            .map(|row| {
                let mut target = RenderTarget::new(Vec::new(), RenderCaps::PLAIN);
                self.paint_row(row, width, &mut target);
                String::from_utf8_lossy(&target.into_inner()).into_owned()
            })
            .collect()
    }
}

/// Shrink the widest children first until the row fits or nothing shrinks.
fn reflow_horizontal(h: &HorizontalContent, width: usize) -> Renderable {
    let mut children = h.children().to_vec();
    let mut total = h.width();
    let mut order: Vec<usize> = (0..children.len()).collect();
    order.sort_by_key(|&i| Reverse(children[i].width()));
    for i in order {
        if total <= width {
            break;
        }
        let current = children[i].width();
        let target = current.saturating_sub(total - width).max(1);
        let shrunk = children[i].reflow(target);
        total = total - current + shrunk.width();
        children[i] = shrunk;
    }
    Renderable::from(HorizontalContent::new(children))
}

impl Default for Renderable {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<TextBlock> for Renderable {
    fn from(node: TextBlock) -> Self {
        Self::Text(Arc::new(node))
    }
}

impl From<Arc<TextBlock>> for Renderable {
    fn from(node: Arc<TextBlock>) -> Self {
        Self::Text(node)
    }
}

impl From<ContentBox> for Renderable {
    fn from(node: ContentBox) -> Self {
        Self::Box(Arc::new(node))
    }
}

impl From<HorizontalContent> for Renderable {
    fn from(node: HorizontalContent) -> Self {
        Self::Horizontal(Arc::new(node))
    }
}

impl From<VerticalContent> for Renderable {
    fn from(node: VerticalContent) -> Self {
        Self::Vertical(Arc::new(node))
    }
}

impl From<HyperLink> for Renderable {
    fn from(node: HyperLink) -> Self {
        Self::Link(Arc::new(node))
    }
}

impl From<Collapsable> for Renderable {
    fn from(node: Collapsable) -> Self {
        Self::Collapsable(Arc::new(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_right_and_below_sizes() {
        let a = Renderable::text("abc");
        let b = Renderable::text("de\nf");
        let h = a.clone().add_right(b.clone());
        assert_eq!((h.width(), h.height()), (5, 2));
        let v = a.add_below(b);
        assert_eq!((v.width(), v.height()), (3, 3));
    }

    #[test]
    fn add_left_puts_other_first() {
        let row = Renderable::text("b").add_left(Renderable::text("a"));
        assert_eq!(row.plain_rows(2), vec!["ab"]);
    }

    #[test]
    fn empty_operands_are_skipped() {
        let a = Renderable::text("abc");
        assert!(a.clone().add_right(Renderable::empty()).ptr_eq(&a));
        assert!(Renderable::empty().add_below(a.clone()).ptr_eq(&a));
        assert!(Renderable::empty().boxed(2u8).is_empty());
    }

    #[test]
    fn ptr_eq_is_identity_not_equality() {
        let a = Renderable::text("same");
        let b = Renderable::text("same");
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
        assert!(a.ptr_eq(&a.clone()));
    }

    #[test]
    fn fit_to_width_refuses_narrow_targets() {
        let long = Renderable::text("a fairly long line of build output");
        assert!(long.fit_to_width(10).ptr_eq(&long));
    }

    #[test]
    fn fit_to_width_keeps_fitting_trees() {
        let t = Renderable::text("short");
        assert!(t.fit_to_width(40).ptr_eq(&t));
    }

    #[test]
    fn fit_to_width_rewraps_nested_text() {
        let tree = Renderable::text("compiling the core crate with optimizations")
            .boxed(Padding::horizontal(1))
            .add_below(Renderable::text("done"));
        let fitted = tree.fit_to_width(20);
        assert!(fitted.width() <= 20);
        assert_eq!(
            fitted.plain_rows(20),
            vec![
                " compiling the core ",
                " crate with         ",
                " optimizations      ",
                "done                ",
            ]
        );
    }

    #[test]
    fn fit_to_width_shrinks_widest_horizontal_child() {
        let tree = Renderable::text("[build]").add_right(Renderable::text(
            "linking thirty two object files into one binary",
        ));
        let fitted = tree.fit_to_width(30);
        assert!(fitted.width() <= 30);
        assert_eq!(fitted.plain_rows(30)[0], "[build]linking thirty two     ");
    }

    #[test]
    fn painting_pads_to_requested_width() {
        let t = Renderable::text("hi");
        assert_eq!(t.plain_rows(5), vec!["hi   "]);
        assert_eq!(t.plain_rows(1), vec!["…"]);
    }
}
