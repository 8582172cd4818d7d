//! Room data model: placed elements, walls, door clearance zones.
//!
//! These are the plain records the designer UI owns and the persistence
//! layer stores. The engine borrows them per query and never keeps a copy.
//! Field names serialize in camelCase to match the stored room JSON.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::ROTATION_STEP_DEG;
use crate::error::LayoutError;
use crate::geom::{Rect, Segment, rotated_rect_aabb};
use crate::transform::Point;

/// Unique identifier for a placed element or wall.
pub type ElementId = Uuid;

/// Broad element family; only cabinets take part in cabinet collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cabinet,
    Appliance,
    Fixture,
}

/// Which side a corner cabinet's door hinges on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HingeDirection {
    Left,
    Right,
}

/// Room size in design-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub width: f64,
    pub height: f64,
}

impl RoomDimensions {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// A cabinet, appliance, or fixture placed in the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    /// Catalog key, e.g. `"base-24"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub category: Category,
    /// Top-left of the footprint in design space.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub depth: f64,
    /// Degrees, a multiple of 15.
    #[serde(default)]
    pub rotation: f64,
    /// Height override in inches; the catalog height applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_height: Option<f64>,
    /// Inches from the floor; the catalog mount height applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hinge_direction: Option<HingeDirection>,
}

impl Element {
    /// A new unrotated element with a fresh id.
    #[must_use]
    pub fn new(kind: impl Into<String>, category: Category, x: f64, y: f64, width: f64, depth: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: kind.into(),
            category,
            x,
            y,
            width,
            depth,
            rotation: 0.0,
            actual_height: None,
            mount_height: None,
            hinge_direction: None,
        }
    }

    #[must_use]
    pub fn is_cabinet(&self) -> bool {
        self.category == Category::Cabinet
    }

    /// Whether the rotation is a multiple of 90°.
    #[must_use]
    pub fn is_quarter_turn(&self) -> bool {
        normalize_rotation(self.rotation) % 90.0 == 0.0
    }

    /// Width and depth as laid out on the floor: swapped at 90° and 270°.
    #[must_use]
    pub fn oriented_size(&self) -> (f64, f64) {
        let r = normalize_rotation(self.rotation);
        if r == 90.0 || r == 270.0 { (self.depth, self.width) } else { (self.width, self.depth) }
    }

    /// Floor footprint in design space.
    ///
    /// Quarter turns keep `(x, y)` as the top-left and swap the extent. Other
    /// angles use the bounding box of the rectangle rotated about its center.
    #[must_use]
    pub fn footprint(&self) -> Rect {
        if self.is_quarter_turn() {
            let (w, d) = self.oriented_size();
            return Rect::new(self.x, self.y, w, d);
        }
        let center = Point::new(self.x + self.width / 2.0, self.y + self.depth / 2.0);
        rotated_rect_aabb(center, self.width, self.depth, self.rotation)
    }

    /// A copy moved to `(x, y)`.
    #[must_use]
    pub fn moved_to(&self, x: f64, y: f64) -> Self {
        Self { x, y, ..self.clone() }
    }

    /// A copy rotated by `delta_deg`, normalized to a 15° step in `[0, 360)`.
    #[must_use]
    pub fn rotated_by(&self, delta_deg: f64) -> Self {
        Self { rotation: normalize_rotation(self.rotation + delta_deg), ..self.clone() }
    }
}

/// Round to the nearest 15° step and wrap into `[0, 360)`.
///
/// Non-finite input becomes 0.
#[must_use]
pub fn normalize_rotation(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let snapped = (deg / ROTATION_STEP_DEG).round() * ROTATION_STEP_DEG;
    let wrapped = snapped.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Whether a wall is one of the four derived room edges or a drawn wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallKind {
    Boundary,
    Custom,
}

/// A wall segment in design space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub id: ElementId,
    /// Stable bookkeeping number; 1-4 are the room edges.
    pub wall_number: u32,
    pub kind: WallKind,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub thickness: f64,
}

impl Wall {
    /// Create a custom wall, rejecting coincident or non-finite endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NonFiniteCoordinate`] for NaN/infinite input and
    /// [`LayoutError::ZeroLengthWall`] when both endpoints are the same.
    pub fn custom(wall_number: u32, start: Point, end: Point, thickness: f64) -> Result<Self, LayoutError> {
        validate_wall(start, end, thickness)?;
        Ok(Self {
            id: Uuid::new_v4(),
            wall_number,
            kind: WallKind::Custom,
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            thickness,
        })
    }

    /// A derived room-edge wall. The endpoints come from room dimensions, so
    /// no validation is done here.
    #[must_use]
    pub fn boundary(wall_number: u32, start: Point, end: Point, thickness: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            wall_number,
            kind: WallKind::Boundary,
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            thickness,
        }
    }

    #[must_use]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    #[must_use]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// The wall as a segment, or `None` when an endpoint is missing
    /// (non-finite) or the wall has collapsed to a point.
    #[must_use]
    pub fn segment(&self) -> Option<Segment> {
        let (a, b) = (self.start(), self.end());
        if !a.is_finite() || !b.is_finite() || a == b {
            return None;
        }
        Some(Segment::new(a, b))
    }
}

pub(crate) fn validate_wall(start: Point, end: Point, thickness: f64) -> Result<(), LayoutError> {
    for (field, value) in [("x1", start.x), ("y1", start.y), ("x2", end.x), ("y2", end.y), ("thickness", thickness)] {
        if !value.is_finite() {
            return Err(LayoutError::NonFiniteCoordinate { field, value });
        }
    }
    if start == end {
        return Err(LayoutError::ZeroLengthWall { x: start.x, y: start.y });
    }
    Ok(())
}

/// No-placement zone in front of a door, supplied by the door manager.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorClearanceZone {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees about the zone center; `None` or 0 for axis-aligned zones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl DoorClearanceZone {
    /// Axis-aligned area blocked by the zone; rotated zones are over-approximated.
    #[must_use]
    pub fn blocked_area(&self) -> Rect {
        let rect = Rect::new(self.x, self.y, self.width, self.height);
        match self.rotation {
            Some(deg) if deg != 0.0 => rotated_rect_aabb(rect.center(), self.width, self.height, deg),
            _ => rect,
        }
    }
}
