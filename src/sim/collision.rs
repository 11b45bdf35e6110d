//! Collision tests shared by the games
//!
//! Box-vs-box overlap (optionally with a forgiving inset), point-in-box, and
//! wall reflection for balls.

use glam::Vec2;

/// Axis-aligned box, stored as top-left corner plus size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn min(&self) -> Vec2 {
        self.pos
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Shrink on every side by `inset` (never below zero size)
    pub fn inset(&self, inset: f32) -> Self {
        let shrink = Vec2::splat(inset).min(self.size * 0.5);
        Self {
            pos: self.pos + shrink,
            size: self.size - shrink * 2.0,
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }

    /// Inclusive point containment
    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

/// Mirror `velocity` about a unit surface `normal`
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Bounce a ball off the left and right walls of a field `width` wide.
///
/// Returns true if a wall was hit.
pub fn bounce_side_walls(pos: &mut Vec2, vel: &mut Vec2, radius: f32, width: f32) -> bool {
    if pos.x - radius < 0.0 && vel.x < 0.0 {
        pos.x = radius;
        *vel = reflect_velocity(*vel, Vec2::X);
        true
    } else if pos.x + radius > width && vel.x > 0.0 {
        pos.x = width - radius;
        *vel = reflect_velocity(*vel, Vec2::NEG_X);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(10.0, 0.0, 10.0, 10.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Touching edges
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_rect_inset_forgives_grazes() {
        let ship = Rect::new(0.0, 0.0, 48.0, 54.0);
        let graze = Rect::new(45.0, 0.0, 40.0, 40.0);
        assert!(ship.overlaps(&graze));
        assert!(!ship.inset(5.0).overlaps(&graze));
    }

    #[test]
    fn test_rect_inset_never_negative() {
        let r = Rect::new(0.0, 0.0, 4.0, 4.0).inset(10.0);
        assert!(r.size.x >= 0.0 && r.size.y >= 0.0);
        assert_eq!(r.center(), Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_reflect_off_floor() {
        let v = reflect_velocity(Vec2::new(3.0, 7.0), Vec2::NEG_Y);
        assert_eq!(v, Vec2::new(3.0, -7.0));
    }

    #[test]
    fn test_bounce_side_walls() {
        let mut pos = Vec2::new(2.0, 50.0);
        let mut vel = Vec2::new(-4.0, 3.0);
        assert!(bounce_side_walls(&mut pos, &mut vel, 5.0, 400.0));
        assert_eq!(pos.x, 5.0);
        assert_eq!(vel, Vec2::new(4.0, 3.0));

        // Moving away from the wall: no bounce
        let mut vel = Vec2::new(4.0, 3.0);
        assert!(!bounce_side_walls(&mut pos, &mut vel, 5.0, 400.0));
    }
}
