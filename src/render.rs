//! Presentation interfaces
//!
//! The simulation never holds a render handle. A [`Presenter`] replays
//! [`GameEvent`]s onto any [`Canvas`], keeping the entity-id to handle map on
//! the presentation side, and forwards score/lives to a [`Hud`].

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use glam::Vec2;

use crate::sim::geom::Aabb;
use crate::sim::state::{Color, EntityId, EntityKind, GameEvent, Prompt};

/// What to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeKind {
    Oval,
    Rectangle,
    Text(String),
}

/// Drawing surface the presenter talks to
pub trait Canvas {
    type Handle: Copy + Eq + Hash;

    fn create_shape(&mut self, kind: ShapeKind, bounds: Aabb, fill: Color) -> Self::Handle;
    fn move_shape(&mut self, handle: Self::Handle, delta: Vec2);
    fn delete(&mut self, handle: Self::Handle);
    fn recolor(&mut self, handle: Self::Handle, color: Color);
    fn viewport_width(&self) -> f32;
}

/// Score/lives display. Observational only.
pub trait Hud {
    fn on_score_changed(&mut self, score: u32);
    fn on_lives_changed(&mut self, lives: i32);
}

impl Hud for () {
    fn on_score_changed(&mut self, _score: u32) {}
    fn on_lives_changed(&mut self, _lives: i32) {}
}

/// Last values shown on the HUD
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HudState {
    pub score: u32,
    pub lives: i32,
}

impl Hud for HudState {
    fn on_score_changed(&mut self, score: u32) {
        self.score = score;
    }

    fn on_lives_changed(&mut self, lives: i32) {
        self.lives = lives;
    }
}

/// Life indicator layout: first centre and spacing along x
const LIFE_ORIGIN: Vec2 = Vec2::new(30.0, 20.0);
const LIFE_SPACING: f32 = 30.0;
const LIFE_HALF: Vec2 = Vec2::new(10.0, 10.0);
const LIFE_GLYPH: &str = "\u{2665}";
/// Vertical distance between prompt lines
const PROMPT_LINE_SPACING: f32 = 60.0;
const PROMPT_HALF: Vec2 = Vec2::new(150.0, 20.0);

/// Mirrors simulation events onto a canvas
pub struct Presenter<C: Canvas, H: Hud> {
    canvas: C,
    hud: H,
    arena: Vec2,
    shapes: HashMap<EntityId, C::Handle>,
    lives: Vec<C::Handle>,
    prompt: Vec<C::Handle>,
}

impl<C: Canvas, H: Hud> Presenter<C, H> {
    pub fn new(canvas: C, hud: H, arena: Vec2) -> Self {
        let viewport = canvas.viewport_width();
        if viewport != arena.x {
            log::warn!("Canvas is {viewport}px wide but the arena is {}px", arena.x);
        }
        Self {
            canvas,
            hud,
            arena,
            shapes: HashMap::new(),
            lives: Vec::new(),
            prompt: Vec::new(),
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    /// Render handle for a simulated entity
    pub fn handle(&self, id: EntityId) -> Option<C::Handle> {
        self.shapes.get(&id).copied()
    }

    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Spawned {
                id,
                kind,
                bounds,
                color,
            } => {
                let shape = match kind {
                    EntityKind::Ball => ShapeKind::Oval,
                    EntityKind::Paddle | EntityKind::Brick => ShapeKind::Rectangle,
                };
                let handle = self.canvas.create_shape(shape, *bounds, *color);
                if let Some(old) = self.shapes.insert(*id, handle) {
                    log::warn!("Entity {id} spawned twice");
                    self.canvas.delete(old);
                }
            }
            GameEvent::Moved { id, delta } => match self.shapes.get(id) {
                Some(&handle) => self.canvas.move_shape(handle, *delta),
                None => log::warn!("Move for unknown entity {id}"),
            },
            GameEvent::Recolored { id, color } => {
                if let Some(&handle) = self.shapes.get(id) {
                    self.canvas.recolor(handle, *color);
                }
            }
            GameEvent::Despawned { id } => {
                if let Some(handle) = self.shapes.remove(id) {
                    self.canvas.delete(handle);
                }
            }
            GameEvent::ScoreChanged { score } => self.hud.on_score_changed(*score),
            GameEvent::LivesChanged { lives } => self.hud.on_lives_changed(*lives),
            GameEvent::LifeIndicatorsReset { count } => self.reset_lives(*count),
            GameEvent::LifeIndicatorRemoved => {
                if let Some(handle) = self.lives.pop() {
                    self.canvas.delete(handle);
                }
            }
            GameEvent::PromptShown(prompt) => self.show_prompt(prompt),
            GameEvent::PromptCleared => self.clear_prompt(),
            GameEvent::PhaseChanged { .. } => {}
        }
    }

    fn reset_lives(&mut self, count: u32) {
        for handle in self.lives.drain(..) {
            self.canvas.delete(handle);
        }
        for i in 0..count {
            let center = LIFE_ORIGIN + Vec2::new(i as f32 * LIFE_SPACING, 0.0);
            let handle = self.canvas.create_shape(
                ShapeKind::Text(LIFE_GLYPH.to_string()),
                Aabb::from_center(center, LIFE_HALF),
                Color::LIFE,
            );
            self.lives.push(handle);
        }
    }

    fn show_prompt(&mut self, prompt: &Prompt) {
        self.clear_prompt();
        let top = self.arena * 0.5;
        for (i, line) in prompt.lines().into_iter().enumerate() {
            let center = top + Vec2::new(0.0, i as f32 * PROMPT_LINE_SPACING);
            let handle = self.canvas.create_shape(
                ShapeKind::Text(line),
                Aabb::from_center(center, PROMPT_HALF),
                prompt.color(),
            );
            self.prompt.push(handle);
        }
    }

    fn clear_prompt(&mut self) {
        for handle in self.prompt.drain(..) {
            self.canvas.delete(handle);
        }
    }
}

/// A shape as last drawn on a [`RecordingCanvas`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedShape {
    pub kind: ShapeKind,
    pub bounds: Aabb,
    pub fill: Color,
}

/// In-memory canvas that just keeps the current picture
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: f32,
    next: u32,
    shapes: BTreeMap<u32, RecordedShape>,
}

impl RecordingCanvas {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            next: 1,
            shapes: BTreeMap::new(),
        }
    }

    pub fn get(&self, handle: u32) -> Option<&RecordedShape> {
        self.shapes.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Every live text shape, in creation order
    pub fn texts(&self) -> Vec<&str> {
        self.shapes
            .values()
            .filter_map(|shape| match &shape.kind {
                ShapeKind::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, kind: &ShapeKind) -> usize {
        self.shapes.values().filter(|s| &s.kind == kind).count()
    }
}

impl Canvas for RecordingCanvas {
    type Handle = u32;

    fn create_shape(&mut self, kind: ShapeKind, bounds: Aabb, fill: Color) -> u32 {
        let handle = self.next;
        self.next += 1;
        self.shapes.insert(handle, RecordedShape { kind, bounds, fill });
        handle
    }

    fn move_shape(&mut self, handle: u32, delta: Vec2) {
        if let Some(shape) = self.shapes.get_mut(&handle) {
            shape.bounds = shape.bounds.translated(delta);
        }
    }

    fn delete(&mut self, handle: u32) {
        self.shapes.remove(&handle);
    }

    fn recolor(&mut self, handle: u32, color: Color) {
        if let Some(shape) = self.shapes.get_mut(&handle) {
            shape.fill = color;
        }
    }

    fn viewport_width(&self) -> f32 {
        self.width
    }
}
