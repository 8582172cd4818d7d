//! Tunable thresholds for snapping, collision, and zoom.
//!
//! Every field defaults to the matching constant in [`crate::consts`]. Hosts
//! that need different feel (e.g. a tablet build with larger snap radii) pass
//! a partial JSON object; missing keys keep their defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::LayoutError;

/// Snap distances, in design-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapConfig {
    pub wall_endpoint_px: f64,
    pub boundary_px: f64,
    pub cabinet_px: f64,
    pub custom_wall_px: f64,
    pub wall_face_gap_px: f64,
    pub search_radius_px: f64,
    pub search_step_px: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            wall_endpoint_px: consts::WALL_ENDPOINT_SNAP_PX,
            boundary_px: consts::BOUNDARY_SNAP_PX,
            cabinet_px: consts::CABINET_SNAP_PX,
            custom_wall_px: consts::CUSTOM_WALL_SNAP_PX,
            wall_face_gap_px: consts::WALL_FACE_GAP_PX,
            search_radius_px: consts::COLLISION_SEARCH_RADIUS_PX,
            search_step_px: consts::COLLISION_SEARCH_STEP_PX,
        }
    }
}

/// Zoom limits and gesture timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    pub double_tap_zoom: f64,
    pub double_tap_window_ms: f64,
    pub long_press_ms: f64,
    pub tap_slop_px: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_zoom: consts::MIN_ZOOM,
            max_zoom: consts::MAX_ZOOM,
            zoom_step: consts::ZOOM_STEP,
            double_tap_zoom: consts::DOUBLE_TAP_ZOOM,
            double_tap_window_ms: consts::DOUBLE_TAP_WINDOW_MS,
            long_press_ms: consts::LONG_PRESS_MS,
            tap_slop_px: consts::TAP_SLOP_PX,
        }
    }
}

impl GestureConfig {
    /// Clamp a zoom factor into `[min_zoom, max_zoom]`. NaN falls back to 1.0.
    ///
    /// Uses `max`/`min` rather than `f64::clamp` so an inverted range loaded
    /// from config degrades instead of panicking.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        let zoom = if zoom.is_nan() { 1.0 } else { zoom };
        zoom.max(self.min_zoom).min(self.max_zoom)
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub snap: SnapConfig,
    pub gesture: GestureConfig,
    /// Flush tolerance for cabinet-vs-cabinet overlap, in pixels.
    pub flush_tolerance_px: f64,
    /// Vertical gap, in inches, that exempts stacked cabinets from collision.
    pub vertical_clearance_in: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            snap: SnapConfig::default(),
            gesture: GestureConfig::default(),
            flush_tolerance_px: consts::FLUSH_TOLERANCE_PX,
            vertical_clearance_in: consts::VERTICAL_CLEARANCE_IN,
        }
    }
}

impl LayoutConfig {
    /// Parse a (possibly partial) JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ConfigParse`] when the input is not valid JSON
    /// or a present key has the wrong type.
    pub fn from_json(raw: &str) -> Result<Self, LayoutError> {
        serde_json::from_str(raw).map_err(LayoutError::ConfigParse)
    }
}
