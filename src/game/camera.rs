//! Side-scrolling camera
//!
//! The viewport is a rectangle in world units the size of the logical
//! resolution. It tracks the player horizontally and never moves vertically.

use macroquad::math::Vec2;
use super::level::TILE_SIZE;
use super::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub viewport: Rect,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, width, height),
        }
    }

    /// Center the viewport horizontally on a tile-sized target at `position`.
    pub fn follow(&mut self, position: Vec2) {
        self.viewport.x = (position.x + TILE_SIZE / 2.0) - self.viewport.w / 2.0;
    }

    /// World position relative to the viewport's top-left corner
    pub fn to_view(&self, position: Vec2) -> Vec2 {
        position - Vec2::new(self.viewport.x, self.viewport.y)
    }

    /// True if `position` lies beyond any edge of the viewport.
    pub fn is_outside(&self, position: Vec2) -> bool {
        let view = self.to_view(position);
        view.x < 0.0 || view.x > self.viewport.w || view.y < 0.0 || view.y > self.viewport.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_centers_target() {
        let mut camera = Camera::new(640.0, 320.0);
        camera.follow(Vec2::new(1000.0, 200.0));
        assert_eq!(camera.viewport.x, 1000.0 + 16.0 - 320.0);
        assert_eq!(camera.viewport.y, 0.0);
    }

    #[test]
    fn test_outside_on_each_edge() {
        let mut camera = Camera::new(640.0, 320.0);
        camera.viewport.x = 100.0;
        assert!(!camera.is_outside(Vec2::new(150.0, 10.0)));
        assert!(camera.is_outside(Vec2::new(99.0, 10.0)));
        assert!(camera.is_outside(Vec2::new(741.0, 10.0)));
        assert!(camera.is_outside(Vec2::new(150.0, -1.0)));
        assert!(camera.is_outside(Vec2::new(150.0, 321.0)));
    }
}
