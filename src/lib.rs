//! Break Bricks - a fixed-tick brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, physics, collisions, game state)
//! - `game`: Single-writer driver that owns the state and arms ticks
//! - `schedule`: Delay-then-run scheduling interface and a virtual clock
//! - `render`: Presentation interfaces fed by simulation events
//! - `config`: Data-driven tuning with validation
//! - `autopilot`: Demo-mode paddle controller

pub mod autopilot;
pub mod config;
pub mod game;
pub mod render;
pub mod schedule;
pub mod sim;

pub use config::{BrickLayout, BrickRow, ConfigError, GameConfig};
pub use game::{Game, Input};
pub use schedule::{Scheduler, VirtualClock, Wakeup, WakeupKind};

/// Game configuration constants
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 610.0;
    pub const ARENA_HEIGHT: f32 = 400.0;

    /// Lives at the start of a game
    pub const INITIAL_LIVES: i32 = 5;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Pixels travelled per axis per tick
    pub const BALL_SPEED: f32 = 5.0;
    /// Ball centre height when spawned on the paddle
    pub const BALL_SPAWN_Y: f32 = 310.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_Y: f32 = 326.0;
    /// Offset applied per left/right key press
    pub const PADDLE_STEP: f32 = 10.0;

    /// Brick defaults
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_ORIGIN_X: f32 = 5.0;
    pub const BRICK_COLUMN_PITCH: f32 = 75.0;
    pub const BRICK_RIGHT_MARGIN: f32 = 5.0;
    /// Narrowest column pitch a layout may use
    pub const MIN_COLUMN_PITCH: f32 = 1.0;
    /// Most columns a layout may produce
    pub const MAX_BRICK_COLUMNS: usize = 1024;

    /// Fixed tick interval (ms)
    pub const TICK_INTERVAL_MS: u64 = 50;
    /// Pause between losing a life and the next serve (ms)
    pub const LIFE_LOST_PAUSE_MS: u64 = 1000;

    pub const POINTS_PER_BRICK_HIT: u32 = 10;
}
