//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per call, no clocks or timers
//! - Stable iteration order (paddle, then bricks in layout order)
//! - No rendering dependencies; visible changes go out as events

pub mod collision;
pub mod geom;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, check_collisions, find_contacts};
pub use geom::{Aabb, Body, Shape};
pub use physics::{Contact, advance, resolve_collision};
pub use state::{
    Ball, Brick, BrickColor, BrickHit, Color, Direction, EntityId, EntityKind, GameEvent,
    GamePhase, GameState, Paddle, Prompt, Sign,
};
pub use tick::{TickOutcome, restart, resume_round, start, tick};
