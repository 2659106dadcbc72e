//! Axis-aligned rectangle geometry for ad bodies and hit regions
//!
//! Every interactive surface in the game is a rectangle: ad bounds, close
//! buttons, decoy buttons, answer rows. Regions are carved out of an ad's
//! bounds as sub-rectangles in the same coordinate space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Check if a point is inside (edges inclusive)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Sub-rectangle at an offset from this rect's top-left corner
    pub fn sub(&self, dx: f32, dy: f32, w: f32, h: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, w, h)
    }

    /// Sub-rectangle anchored to the top-right corner (inset by `dx`, `dy`)
    pub fn sub_top_right(&self, dx: f32, dy: f32, w: f32, h: f32) -> Rect {
        Rect::new(self.right() - dx - w, self.y + dy, w, h)
    }

    /// Sub-rectangle anchored to the bottom-left corner
    pub fn sub_bottom_left(&self, dx: f32, dy: f32, w: f32, h: f32) -> Rect {
        Rect::new(self.x + dx, self.bottom() - dy - h, w, h)
    }

    /// A `w` by `h` rect centered within `area`
    pub fn centered_in(area: &Rect, w: f32, h: f32) -> Rect {
        Rect::new(
            area.x + (area.w - w) / 2.0,
            area.y + (area.h - h) / 2.0,
            w,
            h,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges_inclusive() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(Vec2::new(10.0, 20.0)));
        assert!(r.contains(Vec2::new(110.0, 70.0)));
        assert!(r.contains(Vec2::new(60.0, 45.0)));
        assert!(!r.contains(Vec2::new(9.9, 45.0)));
        assert!(!r.contains(Vec2::new(60.0, 70.1)));
    }

    #[test]
    fn test_sub_anchors() {
        let r = Rect::new(100.0, 100.0, 200.0, 100.0);

        let close = r.sub_top_right(4.0, 4.0, 24.0, 24.0);
        assert_eq!(close.x, 272.0);
        assert_eq!(close.y, 104.0);

        let corner = r.sub_bottom_left(2.0, 2.0, 12.0, 12.0);
        assert_eq!(corner.x, 102.0);
        assert_eq!(corner.bottom(), 198.0);
    }

    #[test]
    fn test_center() {
        let r = Rect::new(0.0, 0.0, 40.0, 20.0);
        assert_eq!(r.center(), Vec2::new(20.0, 10.0));
    }
}
