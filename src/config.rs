//! Game configuration
//!
//! Every tuning value the simulation reads lives here. Loaded from JSON with
//! partial overrides; anything not named keeps its default.

use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::state::BrickColor;

/// Errors surfaced while building or loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A brick row asks for a hit count with no colour in the table.
    #[error("brick row {row} has hit count {hits}, expected 1, 2 or 3")]
    InvalidHitCount { row: usize, hits: u8 },
    /// A single brick was built with a hit count outside the colour table.
    #[error("brick hit count {hits} has no colour, expected 1, 2 or 3")]
    InvalidBrickHits { hits: u8 },
    /// A size, speed or interval that must be finite and positive is not.
    #[error("{name} must be a finite positive number, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },
    /// A position that must be finite is not.
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("layout.column_pitch {pitch} is below the minimum of {min}")]
    ColumnPitchTooSmall { pitch: f32, min: f32 },
    #[error("layout produces {columns} columns, at most {max} are allowed")]
    TooManyColumns { columns: usize, max: usize },
    /// The paddle could never move or even fit.
    #[error("paddle width {paddle} exceeds arena width {arena}")]
    PaddleTooWide { paddle: f32, arena: f32 },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One horizontal row of bricks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickRow {
    /// Centre height of the row
    pub y: f32,
    /// Hits each brick in the row takes before it is removed
    pub hits: u8,
}

/// Grid the bricks are laid out on at round setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickLayout {
    /// Left edge of the first column
    pub origin_x: f32,
    /// Distance between column left edges
    pub column_pitch: f32,
    /// Columns stop before `arena_width - right_margin`
    pub right_margin: f32,
    pub rows: Vec<BrickRow>,
}

impl Default for BrickLayout {
    fn default() -> Self {
        Self {
            origin_x: BRICK_ORIGIN_X,
            column_pitch: BRICK_COLUMN_PITCH,
            right_margin: BRICK_RIGHT_MARGIN,
            rows: vec![
                BrickRow { y: 50.0, hits: 3 },
                BrickRow { y: 70.0, hits: 2 },
                BrickRow { y: 90.0, hits: 1 },
            ],
        }
    }
}

impl BrickLayout {
    /// Number of columns whose left edge lies before `arena_width - right_margin`.
    /// Zero for an empty span or a pitch that is not positive.
    pub fn column_count(&self, arena_width: f32) -> usize {
        let span = arena_width - self.right_margin - self.origin_x;
        // False for NaN too
        let usable = span > 0.0 && self.column_pitch > 0.0;
        if !usable {
            return 0;
        }
        // Float to int casts saturate
        (span / self.column_pitch).ceil() as usize
    }

    /// Left edges of every column that fits in an arena of the given width,
    /// capped at `MAX_BRICK_COLUMNS`
    pub fn column_lefts(&self, arena_width: f32) -> Vec<f32> {
        let count = self.column_count(arena_width).min(MAX_BRICK_COLUMNS);
        (0..count)
            .map(|column| self.origin_x + column as f32 * self.column_pitch)
            .collect()
    }

    /// Centre and hit count of every brick, row by row, left to right
    pub fn cells(&self, arena_width: f32, brick_width: f32) -> Vec<(Vec2, u8)> {
        let lefts = self.column_lefts(arena_width);
        self.rows
            .iter()
            .flat_map(|row| {
                lefts
                    .iter()
                    .map(move |&left| (Vec2::new(left + brick_width / 2.0, row.y), row.hits))
            })
            .collect()
    }
}

/// Complete game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    pub initial_lives: i32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_speed: f32,
    pub ball_spawn_y: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_y: f32,
    /// Offset of a single left/right key press
    pub paddle_step: f32,

    // === Bricks ===
    pub brick_width: f32,
    pub brick_height: f32,
    pub layout: BrickLayout,

    // === Timing ===
    pub tick_interval_ms: u64,
    pub life_lost_pause_ms: u64,

    // === Scoring ===
    pub points_per_brick_hit: u32,

    /// Lay the bricks out again when restarting after a win or loss.
    /// Off by default: a restart only resets score, lives and the ball.
    pub rebuild_bricks_on_restart: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            initial_lives: INITIAL_LIVES,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            ball_spawn_y: BALL_SPAWN_Y,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_y: PADDLE_Y,
            paddle_step: PADDLE_STEP,

            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            layout: BrickLayout::default(),

            tick_interval_ms: TICK_INTERVAL_MS,
            life_lost_pause_ms: LIFE_LOST_PAUSE_MS,

            points_per_brick_hit: POINTS_PER_BRICK_HIT,

            rebuild_bricks_on_restart: false,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("ball_radius", self.ball_radius),
            ("ball_speed", self.ball_speed),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_step", self.paddle_step),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
            ("layout.column_pitch", self.layout.column_pitch),
            ("tick_interval_ms", self.tick_interval_ms as f32),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }

        let positions = [
            ("ball_spawn_y", self.ball_spawn_y),
            ("paddle_y", self.paddle_y),
            ("layout.origin_x", self.layout.origin_x),
            ("layout.right_margin", self.layout.right_margin),
        ];
        let row_heights = self.layout.rows.iter().map(|row| ("layout.rows.y", row.y));
        for (name, value) in positions.into_iter().chain(row_heights) {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        if self.layout.column_pitch < MIN_COLUMN_PITCH {
            return Err(ConfigError::ColumnPitchTooSmall {
                pitch: self.layout.column_pitch,
                min: MIN_COLUMN_PITCH,
            });
        }
        let columns = self.layout.column_count(self.arena_width);
        if columns > MAX_BRICK_COLUMNS {
            return Err(ConfigError::TooManyColumns {
                columns,
                max: MAX_BRICK_COLUMNS,
            });
        }

        if self.paddle_width > self.arena_width {
            return Err(ConfigError::PaddleTooWide {
                paddle: self.paddle_width,
                arena: self.arena_width,
            });
        }

        for (row, brick_row) in self.layout.rows.iter().enumerate() {
            if BrickColor::for_hits(brick_row.hits).is_none() {
                return Err(ConfigError::InvalidHitCount {
                    row,
                    hits: brick_row.hits,
                });
            }
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn life_lost_pause(&self) -> Duration {
        Duration::from_millis(self.life_lost_pause_ms)
    }

    /// Paddle start position (horizontally centred)
    pub fn paddle_start(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.paddle_y)
    }

    /// Arena size as a vector
    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }
}
