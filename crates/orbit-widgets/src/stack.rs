#![forbid(unsafe_code)]

//! Side-by-side and stacked containers.
//!
//! Both containers are immutable. Building one flattens nested containers of
//! the same axis and drops zero-sized children, so composition is
//! associative: `(a + b) + c` and `a + (b + c)` produce equal trees.

use crate::renderable::Renderable;
use crate::segment::SegmentRenderer;

use orbit_style::TextStyle;

/// Children laid out left to right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HorizontalContent {
    children: Vec<Renderable>,
    width: usize,
    height: usize,
}

impl HorizontalContent {
    pub fn new<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Renderable>,
    {
        let mut flat = Vec::new();
        for child in children {
            match child {
                Renderable::Horizontal(inner) => flat.extend(inner.children.iter().cloned()),
                other if !other.is_empty() => flat.push(other),
                _ => {}
            }
        }
        let width = flat.iter().map(Renderable::width).sum();
        let height = flat.iter().map(Renderable::height).max().unwrap_or(0);
        Self {
            children: flat,
            width,
            height,
        }
    }

    pub fn children(&self) -> &[Renderable] {
        &self.children
    }

    /// Sum of child widths.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Tallest child.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn build_segment_tree<'a>(
        &'a self,
        row: usize,
        parent: &mut SegmentRenderer<'a>,
        actual_height: usize,
    ) {
        let child_height = actual_height.max(self.height);
        for child in &self.children {
            let mut seg = parent.fill(child.width(), TextStyle::UNSPECIFIED);
            child.build_segment_tree(row, &mut seg, child_height);
            parent.attach(seg);
        }
    }
}

/// Children stacked top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VerticalContent {
    children: Vec<Renderable>,
    width: usize,
    height: usize,
}

impl VerticalContent {
    pub fn new<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Renderable>,
    {
        let mut flat = Vec::new();
        for child in children {
            match child {
                Renderable::Vertical(inner) => flat.extend(inner.children.iter().cloned()),
                other if !other.is_empty() => flat.push(other),
                _ => {}
            }
        }
        let width = flat.iter().map(Renderable::width).max().unwrap_or(0);
        let height = flat.iter().map(Renderable::height).sum();
        Self {
            children: flat,
            width,
            height,
        }
    }

    pub fn children(&self) -> &[Renderable] {
        &self.children
    }

    /// Widest child.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Sum of child heights.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Child owning `row`, and the row index inside it.
    pub fn locate(&self, row: usize) -> Option<(&Renderable, usize)> {
        let mut top = 0;
        for child in &self.children {
            let h = child.height();
            if row < top + h {
                return Some((child, row - top));
            }
            top += h;
        }
        None
    }

    pub(crate) fn build_segment_tree<'a>(&'a self, row: usize, parent: &mut SegmentRenderer<'a>) {
        if let Some((child, local)) = self.locate(row) {
            child.build_segment_tree(local, parent, child.height());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Renderable {
        Renderable::text(s)
    }

    #[test]
    fn horizontal_sizes() {
        let h = HorizontalContent::new([text("ab"), text("cde\nf")]);
        assert_eq!(h.width(), 5);
        assert_eq!(h.height(), 2);
    }

    #[test]
    fn vertical_sizes() {
        let v = VerticalContent::new([text("ab"), text("cde\nf")]);
        assert_eq!(v.width(), 3);
        assert_eq!(v.height(), 3);
    }

    #[test]
    fn nested_same_axis_is_flattened() {
        let inner = Renderable::Horizontal(HorizontalContent::new([text("a"), text("b")]).into());
        let outer = HorizontalContent::new([inner, text("c")]);
        assert_eq!(outer.children().len(), 3);
    }

    #[test]
    fn empty_children_are_dropped() {
        let v = VerticalContent::new([text(""), text("x"), Renderable::empty()]);
        assert_eq!(v.children().len(), 1);
    }

    #[test]
    fn locate_finds_owning_child() {
        let v = VerticalContent::new([text("a\nb"), text("c")]);
        let (child, local) = v.locate(2).unwrap();
        assert_eq!(child.width(), 1);
        assert_eq!(local, 0);
        assert!(v.locate(3).is_none());
    }
}
