//! Axis-aligned geometry for entity bodies
//!
//! Every body is stored by its centre. Bounds are derived on demand, so a
//! translation can never leave them out of sync.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (screen coordinates, y grows downward)
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

    /// `(min_x, min_y, max_x, max_y)`
    #[inline]
    pub fn as_tuple(&self) -> (f32, f32, f32, f32) {
        (self.min.x, self.min.y, self.max.x, self.max.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.min.x + self.max.x) * 0.5
    }

    /// Boxes overlap unless separated on some axis. Touching edges count.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

/// Shape of a body around its centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { size: Vec2 },
}

impl Shape {
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::splat(radius),
            Shape::Rect { size } => size * 0.5,
        }
    }
}

/// A positioned shape. Moving it never clamps; that is up to the owner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub center: Vec2,
    pub shape: Shape,
}

impl Body {
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            shape: Shape::Circle { radius },
        }
    }

    pub fn rect(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            shape: Shape::Rect { size },
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.center, self.shape.half_extents())
    }

    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}
