//! Property-based tests for the geometric primitives
//!
//! Verifies the rectangle and quad invariants the containment math relies
//! on: normalized corners, non-negative areas, intersections contained in
//! both operands, unions containing both operands.

use marginalia::{Point, Quad, Rect};
use proptest::prelude::*;

// Strategy for generating finite f64 coordinates
fn finite_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1e6..1e6f64,
        Just(0.0),
        Just(1.0),
        Just(-1.0),
        Just(612.0),
        Just(792.0),
    ]
}

// Strategy for generating rectangles from arbitrary corner pairs
prop_compose! {
    fn rect_strategy()(
        x0 in finite_f64(),
        y0 in finite_f64(),
        x1 in finite_f64(),
        y1 in finite_f64()
    ) -> Rect {
        Rect::new(x0, y0, x1, y1)
    }
}

// Strategy for generating quads with arbitrary corner ordering
prop_compose! {
    fn quad_strategy()(
        x0 in finite_f64(), y0 in finite_f64(),
        x1 in finite_f64(), y1 in finite_f64(),
        x2 in finite_f64(), y2 in finite_f64(),
        x3 in finite_f64(), y3 in finite_f64()
    ) -> Quad {
        Quad::new([
            Point::new(x0, y0),
            Point::new(x1, y1),
            Point::new(x2, y2),
            Point::new(x3, y3),
        ])
    }
}

proptest! {
    #[test]
    fn test_rect_new_normalizes_corners(
        x0 in finite_f64(),
        y0 in finite_f64(),
        x1 in finite_f64(),
        y1 in finite_f64()
    ) {
        let rect = Rect::new(x0, y0, x1, y1);
        prop_assert!(rect.x0 <= rect.x1);
        prop_assert!(rect.y0 <= rect.y1);
    }

    #[test]
    fn test_rect_area_non_negative(rect in rect_strategy()) {
        prop_assert!(rect.area() >= 0.0, "Area was {}", rect.area());
    }

    #[test]
    fn test_intersection_contained_in_both(a in rect_strategy(), b in rect_strategy()) {
        if let Some(i) = a.intersection(&b) {
            prop_assert!(i.x0 >= a.x0 && i.x1 <= a.x1);
            prop_assert!(i.y0 >= a.y0 && i.y1 <= a.y1);
            prop_assert!(i.x0 >= b.x0 && i.x1 <= b.x1);
            prop_assert!(i.y0 >= b.y0 && i.y1 <= b.y1);
            prop_assert!(i.area() > 0.0);
        }
    }

    #[test]
    fn test_intersection_commutes(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn test_self_intersection_is_identity(rect in rect_strategy()) {
        if rect.area() > 0.0 {
            prop_assert_eq!(rect.intersection(&rect), Some(rect));
        }
    }

    #[test]
    fn test_union_contains_both(a in rect_strategy(), b in rect_strategy()) {
        let u = a.union(&b);
        prop_assert!(u.x0 <= a.x0 && u.x1 >= a.x1);
        prop_assert!(u.y0 <= a.y0 && u.y1 >= a.y1);
        prop_assert!(u.x0 <= b.x0 && u.x1 >= b.x1);
        prop_assert!(u.y0 <= b.y0 && u.y1 >= b.y1);
    }

    #[test]
    fn test_union_area_at_least_each_operand(a in rect_strategy(), b in rect_strategy()) {
        let u = a.union(&b);
        prop_assert!(u.area() >= a.area());
        prop_assert!(u.area() >= b.area());
    }

    #[test]
    fn test_quad_bounding_rect_contains_corners(quad in quad_strategy()) {
        let rect = quad.bounding_rect();
        for p in &quad.points {
            prop_assert!(p.x >= rect.x0 && p.x <= rect.x1);
            prop_assert!(p.y >= rect.y0 && p.y <= rect.y1);
        }
    }

    #[test]
    fn test_quad_from_rect_round_trips(rect in rect_strategy()) {
        prop_assert_eq!(Quad::from_rect(rect).bounding_rect(), rect);
    }
}
