//! Deterministic default placement for items without a saved position.
//!
//! Every value is a pure function of the item's index and the number of
//! items, so an unsaved board looks identical across reloads.

use crate::model::{Item, LayoutMap, Position};

const NOISE_SCALE: f64 = 10_000.0;

const X_SALT: (f64, f64) = (12.9898, 1.0);
const Y_SALT: (f64, f64) = (78.233, 2.0);
const ROTATION_SALT: (f64, f64) = (37.719, 3.0);

pub const X_MIN: f32 = 10.0;
pub const X_SPAN: f32 = 80.0;
pub const Y_MARGIN: f32 = 15.0;
pub const Y_SPREAD: f32 = 70.0;
pub const Y_SINGLE: f32 = 50.0;
pub const Y_JITTER: f32 = 8.0;
pub const ROTATION_MAX_DEG: f32 = 12.0;

/// Range every generated position falls into.
pub const DEFAULT_BOUNDS: DefaultBounds = DefaultBounds {
    x: (X_MIN, X_MIN + X_SPAN),
    y: (Y_MARGIN - Y_JITTER * 0.5, Y_MARGIN + Y_SPREAD + Y_JITTER * 0.5),
    rotation: (-ROTATION_MAX_DEG, ROTATION_MAX_DEG),
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultBounds {
    pub x: (f32, f32),
    pub y: (f32, f32),
    pub rotation: (f32, f32),
}

impl DefaultBounds {
    pub fn contains(&self, position: &Position) -> bool {
        in_range(position.x, self.x)
            && in_range(position.y, self.y)
            && in_range(position.rotation, self.rotation)
    }
}

fn in_range(value: f32, (min, max): (f32, f32)) -> bool {
    value >= min && value <= max
}

/// `frac(sin(seed) * K)`, in `[0, 1)`.
pub fn seeded_rand(seed: f64) -> f64 {
    let value = seed.sin() * NOISE_SCALE;
    let frac = value - value.floor();
    if frac >= 1.0 {
        0.0
    } else {
        frac
    }
}

fn axis_rand(index: usize, (scale, offset): (f64, f64)) -> f64 {
    seeded_rand(index as f64 * scale + offset)
}

/// Evenly spread vertical baseline before jitter.
pub fn base_y(index: usize, count: usize) -> f32 {
    if count <= 1 {
        return Y_SINGLE;
    }
    let t = index.min(count - 1) as f32 / (count - 1) as f32;
    t * Y_SPREAD + Y_MARGIN
}

pub fn default_position(index: usize, count: usize) -> Position {
    let x = X_MIN + axis_rand(index, X_SALT) as f32 * X_SPAN;
    let jitter = (axis_rand(index, Y_SALT) as f32 - 0.5) * Y_JITTER;
    let y = base_y(index, count) + jitter;
    let rotation = (axis_rand(index, ROTATION_SALT) as f32 - 0.5) * 2.0 * ROTATION_MAX_DEG;
    Position::new(x, y, rotation)
}

pub fn default_layout(items: &[Item]) -> LayoutMap {
    let count = items.len();
    items
        .iter()
        .enumerate()
        .map(|(index, item)| (item.id.clone(), default_position(index, count)))
        .collect()
}
