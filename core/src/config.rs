use serde::{Deserialize, Serialize};

pub const TAP_THRESHOLD_PX: f32 = 5.0;
pub const CLICK_SUPPRESS_MS: f64 = 100.0;
pub const Y_MAX_DEFAULT: f32 = 100.0;
pub const Y_MAX_EDIT: f32 = 200.0;
pub const LAYOUT_BASE_DEFAULT: &str = "/images";
pub const CACHE_KEY_PREFIX_DEFAULT: &str = "stickerboard.layout";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Accumulated |dx| + |dy| in px at which a gesture counts as a drag.
    pub tap_threshold_px: f32,
    pub click_suppress_ms: f64,
    pub y_max: f32,
    pub y_max_edit: f32,
    pub layout_base: String,
    pub cache_key_prefix: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            tap_threshold_px: TAP_THRESHOLD_PX,
            click_suppress_ms: CLICK_SUPPRESS_MS,
            y_max: Y_MAX_DEFAULT,
            y_max_edit: Y_MAX_EDIT,
            layout_base: LAYOUT_BASE_DEFAULT.to_string(),
            cache_key_prefix: CACHE_KEY_PREFIX_DEFAULT.to_string(),
        }
    }
}

impl BoardConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let config: BoardConfig = serde_json::from_str(raw)?;
        Ok(config.sanitized())
    }

    pub fn y_max_for(&self, edit_mode: bool) -> f32 {
        if edit_mode {
            self.y_max_edit
        } else {
            self.y_max
        }
    }

    /// Replaces out-of-range values with their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.tap_threshold_px.is_finite() || self.tap_threshold_px < 0.0 {
            self.tap_threshold_px = defaults.tap_threshold_px;
        }
        if !self.click_suppress_ms.is_finite() || self.click_suppress_ms < 0.0 {
            self.click_suppress_ms = defaults.click_suppress_ms;
        }
        if !self.y_max.is_finite() || self.y_max <= 0.0 {
            self.y_max = defaults.y_max;
        }
        if !self.y_max_edit.is_finite() || self.y_max_edit < self.y_max {
            self.y_max_edit = self.y_max.max(defaults.y_max_edit);
        }
        let base = self.layout_base.trim_end_matches('/');
        self.layout_base = base.to_string();
        if self.cache_key_prefix.trim().is_empty() {
            self.cache_key_prefix = defaults.cache_key_prefix;
        }
        self
    }
}
