//! Property-based tests for the cascading style algebra.
//!
//! 1. `override_with` is associative.
//! 2. `complete_with` is associative.
//! 3. `override_with` is idempotent for a repeated argument.
//! 4. A complete style ignores `complete_with`.
//! 5. Folding an ancestor chain top-down with `override_with` equals folding
//!    it bottom-up with `complete_with`.
//! 6. Baked inversion and paint-time inversion resolve to the same colors.

use orbit_style::{Color, ConsoleColor, Effect, TextStyle};
use proptest::prelude::*;

fn color_strategy() -> impl Strategy<Value = Color> {
    any::<u8>().prop_map(Color::from_bits)
}

fn effect_strategy() -> impl Strategy<Value = Effect> {
    (0u8..64).prop_map(Effect::from_bits_truncate)
}

fn style_strategy() -> impl Strategy<Value = TextStyle> {
    (
        proptest::option::of(color_strategy()),
        proptest::option::of(effect_strategy()),
    )
        .prop_map(|(c, e)| TextStyle::new(c, e))
}

proptest! {
    #[test]
    fn override_associative(a in style_strategy(), b in style_strategy(), c in style_strategy()) {
        prop_assert_eq!(a.override_with(b).override_with(c), a.override_with(b.override_with(c)));
    }

    #[test]
    fn complete_associative(a in style_strategy(), b in style_strategy(), c in style_strategy()) {
        prop_assert_eq!(a.complete_with(b).complete_with(c), a.complete_with(b.complete_with(c)));
    }

    #[test]
    fn override_idempotent(a in style_strategy(), b in style_strategy()) {
        prop_assert_eq!(a.override_with(b).override_with(b), a.override_with(b));
    }

    #[test]
    fn complete_style_ignores_completion(c in color_strategy(), e in effect_strategy(), other in style_strategy()) {
        let full = TextStyle::new(Some(c), Some(e));
        prop_assert!(full.is_complete());
        prop_assert_eq!(full.complete_with(other), full);
    }

    #[test]
    fn top_down_equals_bottom_up(chain in proptest::collection::vec(style_strategy(), 0..8)) {
        let top_down = chain
            .iter()
            .fold(TextStyle::UNSPECIFIED, |acc, s| acc.override_with(*s));
        let bottom_up = chain
            .iter()
            .rev()
            .fold(TextStyle::UNSPECIFIED, |acc, s| acc.complete_with(*s));
        prop_assert_eq!(top_down, bottom_up);
    }

    #[test]
    fn inversion_resolves_consistently(c in color_strategy(), e in effect_strategy()) {
        let baked = TextStyle::new(Some(c), Some(e | Effect::INVERT));
        let deferred = TextStyle::with_effect(e | Effect::INVERT).override_with(TextStyle::with_color(c));
        prop_assert_eq!(baked.resolve(Color::DEFAULT), deferred.resolve(Color::DEFAULT));
    }
}

#[test]
fn fore_uses_default_background() {
    let style = TextStyle::fore(ConsoleColor::Green);
    let color = style.color().expect("color set");
    assert_eq!(color.fore(), ConsoleColor::Green);
    assert_eq!(color.back(), Color::DEFAULT.back());
}
