//! Ball motion and collision response
//!
//! The ball only ever travels diagonally: each axis moves `speed` pixels per
//! tick in the direction of its sign, and every bounce negates or forces a sign.

use glam::Vec2;

use super::geom::Aabb;
use super::state::{Ball, EntityId, Sign};

/// Something the ball overlapped this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    Paddle { bounds: Aabb },
    Brick { id: EntityId, bounds: Aabb },
}

impl Contact {
    pub fn bounds(&self) -> Aabb {
        match *self {
            Contact::Paddle { bounds } | Contact::Brick { bounds, .. } => bounds,
        }
    }

    pub fn brick_id(&self) -> Option<EntityId> {
        match *self {
            Contact::Brick { id, .. } => Some(id),
            Contact::Paddle { .. } => None,
        }
    }
}

/// Bounce off the side and top walls, then move one step.
///
/// Walls are tested against the bounds *before* the move, so the ball can
/// overshoot a wall by up to `speed` before turning around. The bottom edge
/// never reflects. Returns the applied translation.
pub fn advance(ball: &mut Ball, arena: Vec2) -> Vec2 {
    let bounds = ball.bounds();
    if bounds.min.x <= 0.0 || bounds.max.x >= arena.x {
        ball.direction.flip_x();
    }
    if bounds.min.y <= 0.0 {
        ball.direction.flip_y();
    }

    let delta = ball.direction.as_vec2() * ball.speed;
    ball.body.translate(delta);
    delta
}

/// Update the ball direction for everything it overlaps this tick.
///
/// - several contacts: vertical bounce (corner case, x untouched)
/// - paddle only: if the ball centre is past a paddle edge, send it that way
///   horizontally; otherwise vertical bounce
/// - one brick: vertical bounce
pub fn resolve_collision(ball: &mut Ball, contacts: &[Contact]) {
    match contacts {
        [] => {}
        [Contact::Paddle { bounds }] => {
            let cx = ball.bounds().center_x();
            if cx > bounds.max.x {
                ball.direction.x = Sign::Pos;
            } else if cx < bounds.min.x {
                ball.direction.x = Sign::Neg;
            } else {
                ball.direction.flip_y();
            }
        }
        [Contact::Brick { .. }] => ball.direction.flip_y(),
        _ => ball.direction.flip_y(),
    }
}
