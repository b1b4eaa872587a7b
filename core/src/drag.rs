//! Pointer drag state machine for a single board.
//!
//! One pointer drags one item at a time. Offsets are tracked in px while
//! the gesture is live and converted to content-box percentages only when
//! the gesture ends.

use std::collections::HashMap;

use crate::bounds::ClampBounds;
use crate::config::BoardConfig;
use crate::model::{BoardGeometry, ItemExtent, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
    pub item: String,
    pub origin: Position,
    pub offset: (f32, f32),
    /// Sum of |dx| + |dy| over every move.
    pub travelled_px: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragPhase {
    Idle,
    Dragging(ActiveDrag),
    Committing(ActiveDrag),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    pub geometry: Option<BoardGeometry>,
    pub extent: Option<ItemExtent>,
    pub now_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    Start { item: String, origin: Position },
    Move { dx: f32, dy: f32 },
    End(DragRelease),
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    Started { item: String, z_index: u32 },
    Moved { item: String, offset: (f32, f32) },
    Committed { item: String, position: Position },
    /// Released below the movement threshold; treat as a click.
    Tap { item: String },
    /// Geometry was not measurable; the pre-drag position stands.
    Dropped { item: String },
    Cancelled { item: String },
    Ignored,
}

pub struct DragController {
    phase: DragPhase,
    tap_threshold_px: f32,
    click_suppress_ms: f64,
    y_max: f32,
    suppress_until: Option<f64>,
    z_order: HashMap<String, u32>,
    z_top: u32,
}

impl DragController {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            phase: DragPhase::Idle,
            tap_threshold_px: config.tap_threshold_px,
            click_suppress_ms: config.click_suppress_ms,
            y_max: config.y_max,
            suppress_until: None,
            z_order: HashMap::new(),
            z_top: 0,
        }
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    pub fn set_y_max(&mut self, y_max: f32) {
        self.y_max = y_max;
    }

    pub fn y_max(&self) -> f32 {
        self.y_max
    }

    /// Stacking order; items that were never dragged sit at 0.
    pub fn z_index(&self, item: &str) -> u32 {
        self.z_order.get(item).copied().unwrap_or(0)
    }

    /// Live px offset of the item being dragged.
    pub fn live_offset(&self) -> Option<(&str, f32, f32)> {
        match &self.phase {
            DragPhase::Dragging(active) => {
                Some((active.item.as_str(), active.offset.0, active.offset.1))
            }
            _ => None,
        }
    }

    /// Whether a click arriving now is the synthetic one that follows a
    /// drag release.
    pub fn suppress_click(&mut self, now_ms: f64) -> bool {
        match self.suppress_until {
            Some(until) if now_ms < until => true,
            Some(_) => {
                self.suppress_until = None;
                false
            }
            None => false,
        }
    }

    pub fn handle(&mut self, event: DragEvent) -> DragOutcome {
        match event {
            DragEvent::Start { item, origin } => self.start(item, origin),
            DragEvent::Move { dx, dy } => self.track(dx, dy),
            DragEvent::End(release) => self.end(release),
            DragEvent::Cancel => self.cancel(),
        }
    }

    fn start(&mut self, item: String, origin: Position) -> DragOutcome {
        if !matches!(self.phase, DragPhase::Idle) {
            return DragOutcome::Ignored;
        }
        self.z_top += 1;
        self.z_order.insert(item.clone(), self.z_top);
        self.suppress_until = None;
        self.phase = DragPhase::Dragging(ActiveDrag {
            item: item.clone(),
            origin,
            offset: (0.0, 0.0),
            travelled_px: 0.0,
        });
        log::trace!("drag start {item}");
        DragOutcome::Started {
            item,
            z_index: self.z_top,
        }
    }

    fn track(&mut self, dx: f32, dy: f32) -> DragOutcome {
        let DragPhase::Dragging(active) = &mut self.phase else {
            return DragOutcome::Ignored;
        };
        if !dx.is_finite() || !dy.is_finite() {
            return DragOutcome::Ignored;
        }
        active.offset.0 += dx;
        active.offset.1 += dy;
        active.travelled_px += dx.abs() + dy.abs();
        DragOutcome::Moved {
            item: active.item.clone(),
            offset: active.offset,
        }
    }

    fn end(&mut self, release: DragRelease) -> DragOutcome {
        let active = match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Dragging(active) => active,
            other => {
                self.phase = other;
                return DragOutcome::Ignored;
            }
        };
        if active.travelled_px < self.tap_threshold_px {
            log::trace!("drag tap {}", active.item);
            return DragOutcome::Tap { item: active.item };
        }
        self.phase = DragPhase::Committing(active.clone());
        let outcome = self.commit(active, release);
        self.phase = DragPhase::Idle;
        outcome
    }

    fn commit(&mut self, active: ActiveDrag, release: DragRelease) -> DragOutcome {
        // The gesture moved, so the trailing click is swallowed even when
        // the commit itself is dropped.
        self.suppress_until = Some(release.now_ms + self.click_suppress_ms);
        let (Some(geometry), Some(extent)) = (release.geometry, release.extent) else {
            log::debug!("drag commit dropped for {}: geometry missing", active.item);
            return DragOutcome::Dropped { item: active.item };
        };
        let Some(bounds) = ClampBounds::for_item(&extent, &geometry, self.y_max) else {
            log::debug!("drag commit dropped for {}: geometry not measurable", active.item);
            return DragOutcome::Dropped { item: active.item };
        };
        let Some((dx, dy)) = geometry.offset_to_percent(active.offset.0, active.offset.1) else {
            return DragOutcome::Dropped { item: active.item };
        };
        let moved = Position::new(
            active.origin.x + dx,
            active.origin.y + dy,
            active.origin.rotation,
        );
        let position = bounds.clamp(moved);
        log::debug!(
            "drag commit {} -> ({:.2}, {:.2})",
            active.item,
            position.x,
            position.y
        );
        DragOutcome::Committed {
            item: active.item,
            position,
        }
    }

    fn cancel(&mut self) -> DragOutcome {
        match std::mem::replace(&mut self.phase, DragPhase::Idle) {
            DragPhase::Dragging(active) => DragOutcome::Cancelled { item: active.item },
            other => {
                self.phase = other;
                DragOutcome::Ignored
            }
        }
    }
}
