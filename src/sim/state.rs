//! Game state and core simulation types
//!
//! Pure data: no render handles live here. Every visible change is queued as a
//! [`GameEvent`] for the presentation layer to pick up.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::{Aabb, Body};
use crate::config::{ConfigError, GameConfig};

/// Stable identifier for a simulated entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 24-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const BALL: Color = Color(0xB565A7);
    pub const PADDLE: Color = Color(0xF47777);
    pub const LIFE: Color = Color(0x9B59B6);
    pub const PROMPT: Color = Color(0xFF69B4);
    pub const GAME_OVER: Color = Color(0xFF0000);
    pub const TEXT: Color = Color(0x000000);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0 & 0xFF_FFFF)
    }
}

/// Fixed hit-count to colour table for bricks
pub struct BrickColor;

impl BrickColor {
    /// Indexed by `hits - 1`
    pub const TABLE: [Color; 3] = [Color(0xFFB6C1), Color(0xFF69B4), Color(0xFF1493)];

    pub fn for_hits(hits: u8) -> Option<Color> {
        match hits {
            1..=3 => Some(Self::TABLE[usize::from(hits - 1)]),
            _ => None,
        }
    }
}

/// One component of the ball direction. Only ever +1 or -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    Neg,
    Pos,
}

impl Sign {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }

    #[inline]
    pub fn as_f32(self) -> f32 {
        match self {
            Sign::Neg => -1.0,
            Sign::Pos => 1.0,
        }
    }
}

/// Per-axis travel direction of the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Direction {
    pub x: Sign,
    pub y: Sign,
}

impl Direction {
    pub const fn new(x: Sign, y: Sign) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn flip_x(&mut self) {
        self.x = self.x.flipped();
    }

    #[inline]
    pub fn flip_y(&mut self) {
        self.y = self.y.flipped();
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x.as_f32(), self.y.as_f32())
    }
}

/// Kind of a simulated entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Ball,
    Paddle,
    Brick,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: EntityId,
    pub body: Body,
    pub direction: Direction,
    /// Distance travelled per axis per tick
    pub speed: f32,
}

impl Ball {
    /// New ball heading up and to the right
    pub fn new(id: EntityId, center: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            id,
            body: Body::circle(center, radius),
            direction: Direction::new(Sign::Pos, Sign::Neg),
            speed,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.body.bounds()
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub id: EntityId,
    pub body: Body,
    /// Ball glued to the paddle before launch (not owned)
    pub carried: Option<EntityId>,
}

impl Paddle {
    pub fn new(id: EntityId, center: Vec2, size: Vec2) -> Self {
        Self {
            id,
            body: Body::rect(center, size),
            carried: None,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.body.bounds()
    }

    /// Move horizontally by `offset` if both edges stay inside `[0, arena_width]`.
    /// Returns whether the move was applied; out-of-range moves are dropped whole.
    pub fn try_move(&mut self, offset: f32, arena_width: f32) -> bool {
        let bounds = self.bounds();
        if bounds.min.x + offset >= 0.0 && bounds.max.x + offset <= arena_width {
            self.body.translate(Vec2::new(offset, 0.0));
            true
        } else {
            false
        }
    }
}

/// Result of hitting a brick once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickHit {
    /// Still standing, shown in the new colour
    Cracked { hits: u8, color: Color },
    /// Out of hits; must leave the live set
    Destroyed,
}

/// A destructible brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: EntityId,
    pub body: Body,
    hits: u8,
}

impl Brick {
    /// Fails if `hits` has no entry in the colour table
    pub fn new(id: EntityId, center: Vec2, size: Vec2, hits: u8) -> Result<Self, ConfigError> {
        if BrickColor::for_hits(hits).is_none() {
            return Err(ConfigError::InvalidBrickHits { hits });
        }
        Ok(Self {
            id,
            body: Body::rect(center, size),
            hits,
        })
    }

    #[inline]
    pub fn hits(&self) -> u8 {
        self.hits
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.body.bounds()
    }

    pub fn color(&self) -> Color {
        BrickColor::for_hits(self.hits).unwrap_or(BrickColor::TABLE[0])
    }

    pub fn hit(&mut self) -> BrickHit {
        assert!(self.hits > 0, "brick {} hit after removal", self.id);
        self.hits -= 1;
        match BrickColor::for_hits(self.hits) {
            Some(color) => BrickHit::Cracked {
                hits: self.hits,
                color,
            },
            None => BrickHit::Destroyed,
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball carried by the paddle, waiting for the start key
    AwaitingStart,
    /// Ticks are running
    Playing,
    /// Ball lost; next serve is set up after a fixed pause
    LifeLostPause,
    /// Every brick is gone
    Won,
    /// Lives fell below zero
    Lost,
}

impl GamePhase {
    /// Won or Lost: only a restart leaves these
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Centred message shown over the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prompt {
    PressToStart,
    Won,
    GameOver { score: u32 },
}

impl Prompt {
    /// Lines of text, top to bottom
    pub fn lines(&self) -> Vec<String> {
        match self {
            Prompt::PressToStart => vec!["Press space to start".to_string()],
            Prompt::Won => vec!["You win!".to_string()],
            Prompt::GameOver { score } => vec![
                "Sorry.. you lose!".to_string(),
                format!("Your score: {score}"),
            ],
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Prompt::PressToStart => Color::PROMPT,
            Prompt::Won => Color::TEXT,
            Prompt::GameOver { .. } => Color::GAME_OVER,
        }
    }
}

/// Everything the presentation layer needs to mirror the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned {
        id: EntityId,
        kind: EntityKind,
        bounds: Aabb,
        color: Color,
    },
    Moved { id: EntityId, delta: Vec2 },
    Recolored { id: EntityId, color: Color },
    Despawned { id: EntityId },
    ScoreChanged { score: u32 },
    LivesChanged { lives: i32 },
    /// Redraw this many life indicators from scratch
    LifeIndicatorsReset { count: u32 },
    LifeIndicatorRemoved,
    PromptShown(Prompt),
    PromptCleared,
    PhaseChanged { phase: GamePhase },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Arena width/height
    pub arena: Vec2,
    /// Lives left; the game is lost once this drops below zero
    pub lives: i32,
    pub score: u32,
    pub phase: GamePhase,
    /// Ticks run since the state was created
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Live bricks in layout order
    pub bricks: Vec<Brick>,
    /// Pending presentation events, oldest first
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Lay out paddle, bricks and the first ball, ready for the start key
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let paddle = Paddle::new(
            EntityId(1),
            config.paddle_start(),
            Vec2::new(config.paddle_width, config.paddle_height),
        );
        let ball = Ball::new(
            EntityId(2),
            Vec2::new(paddle.body.center.x, config.ball_spawn_y),
            config.ball_radius,
            config.ball_speed,
        );

        let mut state = Self {
            arena: config.arena(),
            lives: config.initial_lives,
            score: 0,
            phase: GamePhase::AwaitingStart,
            time_ticks: 0,
            paddle,
            ball,
            bricks: Vec::new(),
            events: Vec::new(),
            next_id: 3,
        };

        let paddle_bounds = state.paddle.bounds();
        state.emit_spawn(state.paddle.id, EntityKind::Paddle, paddle_bounds, Color::PADDLE);
        state.lay_out_bricks(config)?;
        state.emit_spawn(state.ball.id, EntityKind::Ball, state.ball.bounds(), Color::BALL);
        state.paddle.carried = Some(state.ball.id);
        state.events.push(GameEvent::ScoreChanged { score: 0 });
        state.announce_round();

        log::info!(
            "New game: {} bricks, {} lives, arena {}x{}",
            state.bricks.len(),
            state.lives,
            state.arena.x,
            state.arena.y
        );

        Ok(state)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::debug!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged { phase });
        }
    }

    /// Replace every brick with a fresh copy of the configured layout.
    /// On error the board, the events and the id counter are left untouched.
    pub fn lay_out_bricks(&mut self, config: &GameConfig) -> Result<(), ConfigError> {
        let size = Vec2::new(config.brick_width, config.brick_height);
        let mut next_id = self.next_id;
        let fresh = config
            .layout
            .cells(config.arena_width, config.brick_width)
            .into_iter()
            .map(|(center, hits)| {
                let id = EntityId(next_id);
                next_id += 1;
                Brick::new(id, center, size, hits)
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.next_id = next_id;

        for brick in std::mem::replace(&mut self.bricks, fresh) {
            self.events.push(GameEvent::Despawned { id: brick.id });
        }
        self.events.extend(self.bricks.iter().map(|brick| GameEvent::Spawned {
            id: brick.id,
            kind: EntityKind::Brick,
            bounds: brick.bounds(),
            color: brick.color(),
        }));
        Ok(())
    }

    /// Redraw life indicators, put a fresh ball on the paddle and wait for start
    pub fn setup_round(&mut self, config: &GameConfig) {
        self.events.push(GameEvent::Despawned { id: self.ball.id });

        let id = self.next_entity_id();
        let center = Vec2::new(self.paddle.body.center.x, config.ball_spawn_y);
        self.ball = Ball::new(id, center, config.ball_radius, config.ball_speed);
        self.paddle.carried = Some(id);
        self.emit_spawn(id, EntityKind::Ball, self.ball.bounds(), Color::BALL);

        self.announce_round();
    }

    fn announce_round(&mut self) {
        self.events.push(GameEvent::LifeIndicatorsReset {
            count: u32::try_from(self.lives).unwrap_or(0),
        });
        self.events.push(GameEvent::LivesChanged { lives: self.lives });
        self.events.push(GameEvent::PromptShown(Prompt::PressToStart));
        self.set_phase(GamePhase::AwaitingStart);
    }

    /// Move the paddle by `offset`, dragging a carried ball along.
    /// Returns false when the move would leave the arena.
    pub fn move_paddle(&mut self, offset: f32) -> bool {
        if !self.paddle.try_move(offset, self.arena.x) {
            log::debug!(
                "Paddle move {offset} rejected at {:?}",
                self.paddle.bounds().as_tuple()
            );
            return false;
        }

        let delta = Vec2::new(offset, 0.0);
        self.events.push(GameEvent::Moved {
            id: self.paddle.id,
            delta,
        });

        if self.paddle.carried == Some(self.ball.id) {
            self.ball.body.translate(delta);
            self.events.push(GameEvent::Moved {
                id: self.ball.id,
                delta,
            });
        }
        true
    }

    /// Hit the live brick with this id, removing it once it runs out of hits
    pub fn hit_brick(&mut self, id: EntityId) -> Option<BrickHit> {
        let index = self.bricks.iter().position(|b| b.id == id)?;
        let outcome = self.bricks[index].hit();
        match outcome {
            BrickHit::Cracked { hits, color } => {
                log::debug!("Brick {id} cracked, {hits} hits left");
                self.events.push(GameEvent::Recolored { id, color });
            }
            BrickHit::Destroyed => {
                log::debug!("Brick {id} destroyed");
                self.bricks.remove(index);
                self.events.push(GameEvent::Despawned { id });
            }
        }
        Some(outcome)
    }

    pub fn add_score(&mut self, points: u32) {
        if points > 0 {
            self.score = self.score.saturating_add(points);
            self.events.push(GameEvent::ScoreChanged { score: self.score });
        }
    }

    fn emit_spawn(&mut self, id: EntityId, kind: EntityKind, bounds: Aabb, color: Color) {
        self.events.push(GameEvent::Spawned {
            id,
            kind,
            bounds,
            color,
        });
    }
}
