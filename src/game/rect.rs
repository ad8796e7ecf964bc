//! Axis-aligned rectangle for colliders and the camera viewport

use macroquad::math::Vec2;

/// A rectangle defined by position and size.
///
/// Colliders store this in entity-local coordinates (an offset from the
/// entity position); [`Rect::offset`] moves it into world space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Translate by a world-space position
    pub fn offset(&self, by: Vec2) -> Self {
        Self::new(self.x + by.x, self.y + by.y, self.w, self.h)
    }

    /// Overlapping region of two rectangles.
    ///
    /// Returns None when the overlap has zero or negative extent on either
    /// axis, so rectangles that merely touch don't intersect.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }

    /// Thin strip of the given height directly below this rectangle.
    pub fn strip_below(&self, height: f32) -> Self {
        Self::new(self.x, self.bottom(), self.w, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_extent() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(8.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(8.0, 5.0, 2.0, 5.0)));
        assert_eq!(b.intersection(&a), a.intersection(&b));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 32.0, 32.0);
        let right = Rect::new(32.0, 0.0, 32.0, 32.0);
        let below = Rect::new(0.0, 32.0, 32.0, 32.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_strip_below_overlaps_floor() {
        let body = Rect::new(11.0, 6.0, 10.0, 26.0);
        let floor = Rect::new(0.0, 32.0, 32.0, 32.0);
        assert!(!body.overlaps(&floor));
        assert!(body.strip_below(1.0).overlaps(&floor));
    }

    #[test]
    fn test_offset() {
        let local = Rect::new(11.0, 6.0, 10.0, 26.0);
        let world = local.offset(Vec2::new(100.0, 50.0));
        assert_eq!(world, Rect::new(111.0, 56.0, 10.0, 26.0));
        assert_eq!(world.right(), 121.0);
        assert_eq!(world.bottom(), 82.0);
    }
}
