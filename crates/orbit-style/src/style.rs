#![forbid(unsafe_code)]

//! Cascading text styles.
//!
//! A [`TextStyle`] has two independently optional parts, a [`Color`] pair and
//! an [`Effect`] set. Unspecified parts are inherited: a child segment's final
//! style is its parent's final style overridden by whatever the child
//! specifies.
//!
//! # Inversion
//!
//! Building a style with [`Effect::INVERT`] and a concrete color swaps the
//! color immediately and drops the flag, so cascading always compares
//! resolved colors. `INVERT` on a style with no color is kept and applied at
//! paint time against the target's default color (see [`TextStyle::resolve`]).

use crate::color::{Color, ConsoleColor};

bitflags::bitflags! {
    /// Text effect flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Effect: u8 {
        /// No effect.
        const REGULAR       = 0;
        /// Swap foreground and background.
        const INVERT        = 0b0000_0001;
        /// Bold / increased intensity.
        const BOLD          = 0b0000_0010;
        const ITALIC        = 0b0000_0100;
        const UNDERLINE     = 0b0000_1000;
        const BLINK         = 0b0001_0000;
        const STRIKETHROUGH = 0b0010_0000;
    }
}

/// Color and effect, each possibly unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextStyle {
    color: Option<Color>,
    effect: Option<Effect>,
}

impl TextStyle {
    /// Nothing specified; inherits everything.
    pub const UNSPECIFIED: Self = Self {
        color: None,
        effect: None,
    };

    /// Build a style, baking `INVERT` into the color when both are given.
    #[must_use]
    pub fn new(color: Option<Color>, effect: Option<Effect>) -> Self {
        match (color, effect) {
            (Some(color), Some(effect)) if effect.contains(Effect::INVERT) => Self {
                color: Some(color.invert()),
                effect: Some(effect - Effect::INVERT),
            },
            _ => Self { color, effect },
        }
    }

    /// Color only.
    #[must_use]
    pub fn with_color(color: Color) -> Self {
        Self::new(Some(color), None)
    }

    /// Foreground on the default background.
    #[must_use]
    pub fn fore(fore: ConsoleColor) -> Self {
        Self::with_color(Color::DEFAULT.with_fore(fore))
    }

    /// Effect only.
    #[must_use]
    pub fn with_effect(effect: Effect) -> Self {
        Self::new(None, Some(effect))
    }

    #[must_use]
    pub const fn color(&self) -> Option<Color> {
        self.color
    }

    #[must_use]
    pub const fn effect(&self) -> Option<Effect> {
        self.effect
    }

    /// True when neither part is specified.
    #[must_use]
    pub const fn is_unspecified(&self) -> bool {
        self.color.is_none() && self.effect.is_none()
    }

    /// True when both parts are specified.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.color.is_some() && self.effect.is_some()
    }

    /// Replace the parts `other` specifies; keep the rest.
    #[must_use]
    pub fn override_with(self, other: TextStyle) -> Self {
        Self {
            color: other.color.or(self.color),
            effect: other.effect.or(self.effect),
        }
    }

    /// Fill this style's unspecified parts from `other`.
    #[must_use]
    pub fn complete_with(self, other: TextStyle) -> Self {
        Self {
            color: self.color.or(other.color),
            effect: self.effect.or(other.effect),
        }
    }

    /// Concrete color and effect to paint with.
    ///
    /// Unspecified parts fall back to `default` and [`Effect::REGULAR`]; a
    /// remaining `INVERT` flag is applied to the resolved color here.
    #[must_use]
    pub fn resolve(&self, default: Color) -> ResolvedStyle {
        let mut color = self.color.unwrap_or(default);
        let mut effect = self.effect.unwrap_or(Effect::REGULAR);
        if effect.contains(Effect::INVERT) {
            color = color.invert();
            effect.remove(Effect::INVERT);
        }
        ResolvedStyle { color, effect }
    }
}

impl From<Color> for TextStyle {
    fn from(color: Color) -> Self {
        Self::with_color(color)
    }
}

impl From<Effect> for TextStyle {
    fn from(effect: Effect) -> Self {
        Self::with_effect(effect)
    }
}

/// A fully specified style, ready to be diffed and painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedStyle {
    pub color: Color,
    pub effect: Effect,
}

impl ResolvedStyle {
    /// The default color with no effect.
    #[must_use]
    pub const fn plain(color: Color) -> Self {
        Self {
            color,
            effect: Effect::REGULAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_on_black() -> Color {
        Color::new(ConsoleColor::Red, ConsoleColor::Black)
    }

    #[test]
    fn invert_with_color_is_baked_in() {
        let style = TextStyle::new(Some(red_on_black()), Some(Effect::INVERT | Effect::BOLD));
        assert_eq!(style.color(), Some(red_on_black().invert()));
        assert_eq!(style.effect(), Some(Effect::BOLD));
    }

    #[test]
    fn invert_without_color_waits_for_paint() {
        let style = TextStyle::with_effect(Effect::INVERT);
        assert_eq!(style.effect(), Some(Effect::INVERT));
        let resolved = style.resolve(Color::DEFAULT);
        assert_eq!(resolved.color, Color::DEFAULT.invert());
        assert_eq!(resolved.effect, Effect::REGULAR);
    }

    #[test]
    fn override_replaces_specified_parts_only() {
        let base = TextStyle::new(Some(red_on_black()), Some(Effect::BOLD));
        let child = TextStyle::with_effect(Effect::UNDERLINE);
        let merged = base.override_with(child);
        assert_eq!(merged.color(), Some(red_on_black()));
        assert_eq!(merged.effect(), Some(Effect::UNDERLINE));
    }

    #[test]
    fn complete_fills_unspecified_parts_only() {
        let child = TextStyle::with_effect(Effect::UNDERLINE);
        let base = TextStyle::new(Some(red_on_black()), Some(Effect::BOLD));
        let merged = child.complete_with(base);
        assert_eq!(merged.color(), Some(red_on_black()));
        assert_eq!(merged.effect(), Some(Effect::UNDERLINE));
    }

    #[test]
    fn unspecified_resolves_to_default() {
        let resolved = TextStyle::UNSPECIFIED.resolve(Color::DEFAULT);
        assert_eq!(resolved, ResolvedStyle::plain(Color::DEFAULT));
    }

    #[test]
    fn regular_is_empty() {
        assert!(Effect::REGULAR.is_empty());
        assert_eq!(Effect::default(), Effect::REGULAR);
    }
}
