use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One placeable unit on the board: an image, a caption, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image: None,
            text: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Placement relative to the container content box. `x` and `y` are
/// percentages, `rotation` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(alias = "xPercent")]
    pub x: f32,
    #[serde(alias = "yPercent")]
    pub y: f32,
    #[serde(alias = "rotationDegrees")]
    pub rotation: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, rotation: f32) -> Self {
        Self { x, y, rotation }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.rotation.is_finite()
    }
}

pub type LayoutMap = BTreeMap<String, Position>;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Portrait, Orientation::Landscape];

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "portrait" => Some(Orientation::Portrait),
            "landscape" => Some(Orientation::Landscape),
            _ => None,
        }
    }

    /// Square viewports count as landscape.
    pub fn from_viewport(width: f64, height: f64) -> Self {
        if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live size of the positioning surface in px. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoardGeometry {
    pub width: f32,
    pub height: f32,
    pub padding_x: f32,
    pub padding_y: f32,
}

impl BoardGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            padding_x: 0.0,
            padding_y: 0.0,
        }
    }

    pub fn with_padding(mut self, padding_x: f32, padding_y: f32) -> Self {
        self.padding_x = padding_x;
        self.padding_y = padding_y;
        self
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.padding_x * 2.0
    }

    pub fn content_height(&self) -> f32 {
        self.height - self.padding_y * 2.0
    }

    pub fn is_measurable(&self) -> bool {
        let width = self.content_width();
        let height = self.content_height();
        width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0
    }

    /// Converts a px offset into percentages of the content box.
    pub fn offset_to_percent(&self, dx: f32, dy: f32) -> Option<(f32, f32)> {
        if !self.is_measurable() {
            return None;
        }
        Some((
            dx / self.content_width() * 100.0,
            dy / self.content_height() * 100.0,
        ))
    }
}

/// Bounding box of a rendered item in px.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemExtent {
    pub width: f32,
    pub height: f32,
}

impl ItemExtent {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    /// Half extents as a percentage of the geometry's content box.
    pub fn half_percent(&self, geometry: &BoardGeometry) -> Option<(f32, f32)> {
        if !self.is_measurable() || !geometry.is_measurable() {
            return None;
        }
        Some((
            self.width * 0.5 / geometry.content_width() * 100.0,
            self.height * 0.5 / geometry.content_height() * 100.0,
        ))
    }
}
