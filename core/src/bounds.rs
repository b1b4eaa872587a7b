use crate::model::{BoardGeometry, ItemExtent, Position};

/// Allowed range for an item's centre, in percent of the content box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl ClampBounds {
    /// `half_x`/`half_y` are the item's half extents in percent.
    pub fn new(half_x: f32, half_y: f32, y_max: f32) -> Self {
        let half_x = half_x.max(0.0);
        let half_y = half_y.max(0.0);
        let (min_x, max_x) = axis_range(half_x, 100.0);
        let (min_y, max_y) = axis_range(half_y, y_max);
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn for_item(
        extent: &ItemExtent,
        geometry: &BoardGeometry,
        y_max: f32,
    ) -> Option<Self> {
        let (half_x, half_y) = extent.half_percent(geometry)?;
        Some(Self::new(half_x, half_y, y_max))
    }

    pub fn clamp(&self, position: Position) -> Position {
        Position::new(
            position.x.clamp(self.min_x, self.max_x),
            position.y.clamp(self.min_y, self.max_y),
            position.rotation,
        )
    }

    pub fn contains(&self, position: &Position) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.y >= self.min_y
            && position.y <= self.max_y
    }
}

// An item wider than the axis gets pinned to the middle.
fn axis_range(half: f32, max: f32) -> (f32, f32) {
    let low = half;
    let high = max - half;
    if high < low {
        let mid = max * 0.5;
        (mid, mid)
    } else {
        (low, high)
    }
}
