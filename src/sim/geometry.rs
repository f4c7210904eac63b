//! Axis-aligned rectangles and the overlap test
//!
//! Positions are the lower-left corner with y growing upward, matching the
//! window coordinate system the host draws in.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Lower-left corner
    pub pos: DVec2,
    /// Width and height (non-negative)
    pub size: DVec2,
}

impl Rect {
    pub fn new(pos: DVec2, size: DVec2) -> Self {
        Self { pos, size }
    }

    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(DVec2::new(x, y), DVec2::new(width, height))
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.pos.y + self.size.y
    }

    /// True if the two rectangles overlap or touch
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        collision(self, other)
    }
}

/// Collision test between two rectangles
///
/// Rectangles collide unless they are separated along one axis. Separation
/// uses strict comparisons, so edge contact counts as a collision.
pub fn collision(a: &Rect, b: &Rect) -> bool {
    let separate = a.right() < b.left()
        || a.left() > b.right()
        || a.top() < b.bottom()
        || a.bottom() > b.top();
    !separate
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects_collide() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_xywh(5.0, 5.0, 10.0, 10.0);
        assert!(collision(&a, &b));
    }

    #[test]
    fn test_edge_contact_collides() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let right = Rect::from_xywh(10.0, 0.0, 10.0, 10.0);
        let above = Rect::from_xywh(0.0, 10.0, 10.0, 10.0);
        let corner = Rect::from_xywh(10.0, 10.0, 1.0, 1.0);
        assert!(collision(&a, &right));
        assert!(collision(&a, &above));
        assert!(collision(&a, &corner));
    }

    #[test]
    fn test_separated_rects_miss() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        assert!(!collision(&a, &Rect::from_xywh(10.5, 0.0, 5.0, 5.0)));
        assert!(!collision(&a, &Rect::from_xywh(-6.0, 0.0, 5.0, 5.0)));
        assert!(!collision(&a, &Rect::from_xywh(0.0, 10.5, 5.0, 5.0)));
        assert!(!collision(&a, &Rect::from_xywh(0.0, -5.5, 5.0, 5.0)));
    }

    #[test]
    fn test_containment_collides() {
        let outer = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::from_xywh(40.0, 40.0, 2.0, 2.0);
        assert!(collision(&outer, &inner));
        assert!(collision(&inner, &outer));
    }

    fn rect() -> impl Strategy<Value = Rect> {
        (-500.0..500.0f64, -500.0..500.0f64, 0.0..200.0f64, 0.0..200.0f64)
            .prop_map(|(x, y, w, h)| Rect::from_xywh(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(a in rect(), b in rect()) {
            prop_assert_eq!(collision(&a, &b), collision(&b, &a));
        }

        #[test]
        fn prop_rect_collides_with_itself(a in rect()) {
            prop_assert!(a.overlaps(&a));
        }
    }
}
