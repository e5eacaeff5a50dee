#![forbid(unsafe_code)]

//! Box insets.

use std::ops::Add;

/// Four edge insets for box padding.
///
/// Each edge is a single byte. Constructors taking wider integers clamp into
/// `0..=255`, and addition saturates, so nesting boxes can never overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Padding {
    pub top: u8,
    pub left: u8,
    pub bottom: u8,
    pub right: u8,
}

/// Outer margin of a box. Same representation as [`Padding`].
pub type Filler = Padding;

impl Padding {
    /// No insets.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create insets in `top, left, bottom, right` order.
    pub const fn new(top: u8, left: u8, bottom: u8, right: u8) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Create insets from arbitrary integers, clamping each edge to `0..=255`.
    pub fn clamped(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self::new(clamp_u8(top), clamp_u8(left), clamp_u8(bottom), clamp_u8(right))
    }

    /// Same inset on every edge.
    pub const fn all(val: u8) -> Self {
        Self::new(val, val, val, val)
    }

    /// Left and right only.
    pub const fn horizontal(val: u8) -> Self {
        Self::new(0, val, 0, val)
    }

    /// Top and bottom only.
    pub const fn vertical(val: u8) -> Self {
        Self::new(val, 0, val, 0)
    }

    /// Sum of left and right.
    #[inline]
    pub const fn horizontal_sum(&self) -> usize {
        self.left as usize + self.right as usize
    }

    /// Sum of top and bottom.
    #[inline]
    pub const fn vertical_sum(&self) -> usize {
        self.top as usize + self.bottom as usize
    }

    /// True when every edge is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.top == 0 && self.left == 0 && self.bottom == 0 && self.right == 0
    }
}

impl Add for Padding {
    type Output = Padding;

    fn add(self, rhs: Padding) -> Padding {
        Padding {
            top: self.top.saturating_add(rhs.top),
            left: self.left.saturating_add(rhs.left),
            bottom: self.bottom.saturating_add(rhs.bottom),
            right: self.right.saturating_add(rhs.right),
        }
    }
}

impl From<u8> for Padding {
    fn from(val: u8) -> Self {
        Self::all(val)
    }
}

impl From<(u8, u8)> for Padding {
    fn from((vertical, horizontal): (u8, u8)) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }
}

impl From<(u8, u8, u8, u8)> for Padding {
    fn from((top, left, bottom, right): (u8, u8, u8, u8)) -> Self {
        Self::new(top, left, bottom, right)
    }
}

#[inline]
fn clamp_u8(value: i32) -> u8 {
    value.clamp(0, u8::MAX as i32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_limits_each_edge() {
        let p = Padding::clamped(-4, 300, 7, 255);
        assert_eq!(p, Padding::new(0, 255, 7, 255));
    }

    #[test]
    fn add_saturates() {
        let sum = Padding::all(200) + Padding::new(100, 1, 0, 55);
        assert_eq!(sum, Padding::new(255, 201, 200, 255));
    }

    #[test]
    fn sums_do_not_wrap() {
        let p = Padding::all(255);
        assert_eq!(p.horizontal_sum(), 510);
        assert_eq!(p.vertical_sum(), 510);
    }

    #[test]
    fn tuple_conversions() {
        assert_eq!(Padding::from((1, 2)), Padding::new(1, 2, 1, 2));
        assert_eq!(Padding::from(3), Padding::all(3));
        assert!(Padding::ZERO.is_zero());
    }
}
