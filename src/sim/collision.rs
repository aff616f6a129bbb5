//! Collision tests for the simulation
//!
//! Everything on the field is an axis-aligned rectangle, so the workhorse is a
//! plain AABB overlap test. The two exceptions match the original game: the
//! shield is a circular distance check against a bullet's centre point, and
//! the enemy loss condition is a horizontal boundary line, not a rect.

use glam::Vec2;

use crate::consts::*;

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
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

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Half-open AABB intersection test.
///
/// Strict inequalities mean degenerate (zero-size) rectangles never overlap
/// with anything, and edge-touching rectangles do not count as overlapping.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    // An empty half-open interval intersects nothing, whatever its position
    a.size.x > 0.0
        && a.size.y > 0.0
        && b.size.x > 0.0
        && b.size.y > 0.0
        && a.pos.x < b.pos.x + b.size.x
        && a.pos.x + a.size.x > b.pos.x
        && a.pos.y < b.pos.y + b.size.y
        && a.pos.y + a.size.y > b.pos.y
}

/// Whether the shield bubble around `player` absorbs a bullet at `bullet_center`.
///
/// Circular distance test, not AABB: the shield is drawn as a circle of radius
/// `SHIELD_RADIUS` around the player centre.
#[inline]
pub fn shield_absorbs(player: &Rect, bullet_center: Vec2) -> bool {
    player.center().distance(bullet_center) < SHIELD_RADIUS
}

/// Whether an enemy rect has descended past the loss line near the bottom.
#[inline]
pub fn past_loss_line(enemy: &Rect) -> bool {
    enemy.pos.y + enemy.size.y > GAME_HEIGHT - ENEMY_LOSS_MARGIN
}
