//! Property-based invariant tests for render-tree composition.
//!
//! 1. `add_right` and `add_below` are associative.
//! 2. Zero-sized operands are dropped.
//! 3. Container sizes follow sum/max.
//! 4. Every painted row is exactly as wide as requested.
//! 5. Reflow of stacked prose never exceeds the target when all words fit.

use orbit_text::display_width;
use orbit_widgets::Renderable;
use proptest::prelude::*;

fn leaf() -> impl Strategy<Value = Renderable> {
    prop_oneof![
        Just(Renderable::empty()),
        "[a-z]{1,6}( [a-z]{1,4}){0,2}".prop_map(|s| Renderable::text(&s)),
        "[a-z]{1,5}\n[a-z]{1,5}".prop_map(|s| Renderable::text(&s)),
    ]
}

fn tree() -> impl Strategy<Value = Renderable> {
    leaf().prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.add_right(b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| a.add_below(b)),
            (inner, 0u8..3).prop_map(|(a, p)| a.boxed(p)),
        ]
    })
}

fn prose() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,8}", 1..12).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn add_right_associative(a in tree(), b in tree(), c in tree()) {
        let left = a.clone().add_right(b.clone()).add_right(c.clone());
        let right = a.add_right(b.add_right(c));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn add_below_associative(a in tree(), b in tree(), c in tree()) {
        let left = a.clone().add_below(b.clone()).add_below(c.clone());
        let right = a.add_below(b.add_below(c));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn empty_is_identity(a in tree()) {
        prop_assert!(a.clone().add_right(Renderable::empty()).ptr_eq(&a));
        prop_assert!(Renderable::empty().add_below(a.clone()).ptr_eq(&a));
    }

    #[test]
    fn container_sizes(a in tree(), b in tree()) {
        prop_assume!(!a.is_empty() && !b.is_empty());
        let h = a.clone().add_right(b.clone());
        prop_assert_eq!(h.width(), a.width() + b.width());
        prop_assert_eq!(h.height(), a.height().max(b.height()));
        let v = a.clone().add_below(b.clone());
        prop_assert_eq!(v.width(), a.width().max(b.width()));
        prop_assert_eq!(v.height(), a.height() + b.height());
    }

    #[test]
    fn rows_have_requested_width(t in tree(), width in 0usize..40) {
        let rows = t.plain_rows(width);
        prop_assert_eq!(rows.len(), t.height());
        for row in rows {
            prop_assert_eq!(display_width(&row), width);
        }
    }

    #[test]
    fn stacked_prose_fits_after_reflow(
        lines in prop::collection::vec(prose(), 1..4),
        width in 15usize..40,
    ) {
        let tree = lines
            .iter()
            .map(|l| Renderable::text(l))
            .fold(Renderable::empty(), Renderable::add_below);
        let fitted = tree.fit_to_width(width);
        prop_assert!(fitted.width() <= width);
        prop_assert!(fitted.height() >= tree.height());
    }
}
