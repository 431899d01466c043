//! Collision detection and response for axis-aligned geometry
//!
//! Every body in the field is a box (the ball uses its bounding square), so
//! all overlap tests are AABB tests. Responses are the classic arcade ones:
//! axis flips for walls and bricks, position-dependent deflection for the
//! paddle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle};
use crate::consts::{MAX_DEFLECTION_ANGLE, PADDLE_DEFLECT_SPEED};
use crate::map_range;
use crate::settings::Difficulty;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Strict overlap (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }

    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.min.x && x <= self.max.x
    }

    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.min.y && y <= self.max.y
    }
}

/// Which walls the ball is past this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    /// Past the left or right wall
    pub side: bool,
    /// Past the ceiling
    pub top: bool,
}

/// Check the ball against the left, right and top walls. The bottom is open.
pub fn ball_wall_contact(ball: &Ball, field_width: f32) -> WallContact {
    WallContact {
        side: ball.left() < 0.0 || ball.right() > field_width,
        top: ball.top() < 0.0,
    }
}

/// Whether the ball is past the bottom edge of the field
pub fn ball_below_field(ball: &Ball, field_height: f32) -> bool {
    ball.bottom() > field_height
}

/// Paddle hit test: vertical extents overlap and the ball's center lies
/// within the paddle's horizontal span.
///
/// Returns the normalized hit position (0 = left edge, 1 = right edge).
pub fn ball_paddle_hit(ball: &Ball, paddle: &Paddle) -> Option<f32> {
    let vertical = ball.bottom() > paddle.pos.y && ball.top() < paddle.pos.y + paddle.height;
    let horizontal = ball.pos.x > paddle.pos.x && ball.pos.x < paddle.right();
    if vertical && horizontal {
        debug_assert!(paddle.width > 0.0, "paddle width must stay positive");
        let width = paddle.width.max(f32::EPSILON);
        Some(((ball.pos.x - paddle.pos.x) / width).clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Deflection angle for a normalized hit position
#[inline]
pub fn deflection_angle(hit_pos: f32) -> f32 {
    map_range(hit_pos, 0.0, 1.0, -MAX_DEFLECTION_ANGLE, MAX_DEFLECTION_ANGLE)
}

/// Ball velocity after a paddle hit
///
/// Vertical speed keeps its magnitude but always points up; horizontal speed
/// comes from where the paddle was struck. Both are then scaled by the level
/// speed multiplier, with the vertical part held under the difficulty ceiling.
pub fn paddle_rebound(velocity: Vec2, hit_pos: f32, level: u32, difficulty: &Difficulty) -> Vec2 {
    let angle = deflection_angle(hit_pos);
    let boost = difficulty.speed_multiplier(level);
    let vx = PADDLE_DEFLECT_SPEED * angle.sin() * boost;
    let vy = (velocity.y.abs() * boost).min(difficulty.max_vertical_speed);
    Vec2::new(vx, -vy)
}

/// Rebound axes for a ball overlapping a brick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrickRebound {
    pub flip_x: bool,
    pub flip_y: bool,
}

/// Decide which velocity components to invert after a brick overlap
///
/// An axis flips when the ball's center lies outside the brick's span on
/// that axis; a corner hit flips both.
pub fn brick_rebound(ball_center: Vec2, brick: &Aabb) -> BrickRebound {
    BrickRebound {
        flip_x: !brick.contains_x(ball_center.x),
        flip_y: !brick.contains_y(ball_center.y),
    }
}

/// Apply a rebound to a velocity
pub fn apply_rebound(velocity: Vec2, rebound: BrickRebound) -> Vec2 {
    Vec2::new(
        if rebound.flip_x { -velocity.x } else { velocity.x },
        if rebound.flip_y { -velocity.y } else { velocity.y },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::FieldSize;
    use proptest::prelude::*;

    fn ball_at(x: f32, y: f32) -> Ball {
        Ball::new(Vec2::new(x, y), BALL_RADIUS)
    }

    #[test]
    fn test_aabb_overlap_is_strict() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let touching = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let inside = Aabb::new(Vec2::splat(5.0), Vec2::splat(15.0));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_wall_contact() {
        assert_eq!(
            ball_wall_contact(&ball_at(400.0, 300.0), 800.0),
            WallContact::default()
        );
        assert!(ball_wall_contact(&ball_at(5.0, 300.0), 800.0).side);
        assert!(ball_wall_contact(&ball_at(795.0, 300.0), 800.0).side);
        let corner = ball_wall_contact(&ball_at(5.0, 5.0), 800.0);
        assert!(corner.side && corner.top);
    }

    #[test]
    fn test_below_field_uses_bottom_edge() {
        assert!(!ball_below_field(&ball_at(400.0, 590.0), 600.0));
        assert!(ball_below_field(&ball_at(400.0, 591.0), 600.0));
    }

    #[test]
    fn test_paddle_hit_requires_center_inside_span() {
        let paddle = Paddle::for_field(&FieldSize::default());
        let y = paddle.pos.y + 2.0;
        assert!(ball_paddle_hit(&ball_at(paddle.center_x(), y), &paddle).is_some());
        // Ball overlaps the corner but its center is outside the span
        assert!(ball_paddle_hit(&ball_at(paddle.pos.x - 2.0, y), &paddle).is_none());
        // Ball above the paddle
        assert!(ball_paddle_hit(&ball_at(paddle.center_x(), paddle.pos.y - 20.0), &paddle).is_none());
    }

    #[test]
    fn test_center_hit_goes_straight_up() {
        let v = paddle_rebound(Vec2::new(4.0, 4.0), 0.5, 1, &Difficulty::default());
        assert!(v.x.abs() < 1e-6);
        assert!(v.y < 0.0);
        assert!((v.y + 4.4).abs() < 1e-4);
    }

    #[test]
    fn test_edge_hits_give_max_deflection() {
        assert!((deflection_angle(0.0) + MAX_DEFLECTION_ANGLE).abs() < 1e-6);
        assert!((deflection_angle(1.0) - MAX_DEFLECTION_ANGLE).abs() < 1e-6);

        let d = Difficulty::default();
        let left = paddle_rebound(Vec2::new(0.0, 4.0), 0.0, 1, &d);
        let right = paddle_rebound(Vec2::new(0.0, 4.0), 1.0, 1, &d);
        let expected = PADDLE_DEFLECT_SPEED * MAX_DEFLECTION_ANGLE.sin() * 1.1;
        assert!((left.x + expected).abs() < 1e-4);
        assert!((right.x - expected).abs() < 1e-4);
    }

    #[test]
    fn test_rebound_respects_vertical_ceiling() {
        let d = Difficulty::default();
        let v = paddle_rebound(Vec2::new(0.0, 30.0), 0.5, 3, &d);
        assert_eq!(v.y, -d.max_vertical_speed);
        // Below the ceiling the magnitude is only scaled
        let v = paddle_rebound(Vec2::new(0.0, 10.0), 0.5, 3, &d);
        assert!((v.y + 13.0).abs() < 1e-4);
    }

    #[test]
    fn test_brick_rebound_axes() {
        let brick = Aabb::new(Vec2::new(100.0, 100.0), Vec2::new(150.0, 120.0));
        // From below, center within x-span
        let below = brick_rebound(Vec2::new(125.0, 125.0), &brick);
        assert_eq!(below, BrickRebound { flip_x: false, flip_y: true });
        // From the side, center within y-span
        let side = brick_rebound(Vec2::new(95.0, 110.0), &brick);
        assert_eq!(side, BrickRebound { flip_x: true, flip_y: false });
        // Corner flips both
        let corner = brick_rebound(Vec2::new(95.0, 95.0), &brick);
        assert_eq!(corner, BrickRebound { flip_x: true, flip_y: true });

        let v = apply_rebound(Vec2::new(3.0, -4.0), corner);
        assert_eq!(v, Vec2::new(-3.0, 4.0));
    }

    proptest! {
        #[test]
        fn prop_wall_contact_matches_edges(x in -20.0f32..820.0, y in 0.0f32..600.0) {
            let ball = ball_at(x, y);
            let contact = ball_wall_contact(&ball, 800.0);
            prop_assert_eq!(contact.side, x - BALL_RADIUS < 0.0 || x + BALL_RADIUS > 800.0);
        }

        #[test]
        fn prop_paddle_rebound_always_upward(
            hit in 0.0f32..=1.0,
            vy in -12.0f32..12.0,
            level in 1u32..20,
        ) {
            let v = paddle_rebound(Vec2::new(1.0, vy), hit, level, &Difficulty::default());
            prop_assert!(v.y <= 0.0);
            prop_assert!(v.x.abs() <= PADDLE_DEFLECT_SPEED * 2.3 + 1e-3);
        }
    }
}
