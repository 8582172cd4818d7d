//! Wall registry: the room's four boundary walls plus user-drawn walls.
//!
//! Boundary walls are derived from the room dimensions and numbered 1-4
//! (top, right, bottom, left). Custom walls are explicit records numbered
//! from 5 up. Both are exposed as [`Wall`] values tagged with [`WallKind`]
//! so collision and snapping never special-case where a wall came from.
//!
//! Removal is bookkeeping only: a removed wall stays in the registry so it
//! can be restored, and the removed set feeds the billing module's
//! chargeable-modification count.

#[cfg(test)]
#[path = "walls_test.rs"]
mod walls_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::consts::{BOUNDARY_WALL_THICKNESS_PX, FIRST_CUSTOM_WALL_NUMBER};
use crate::error::LayoutError;
use crate::model::{RoomDimensions, Wall, WallKind, validate_wall};
use crate::transform::Point;

/// Which endpoint of a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallEnd {
    Start,
    End,
}

/// Persisted form of the registry. Boundary walls are not stored; they are
/// rebuilt from `dimensions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallSnapshot {
    pub dimensions: RoomDimensions,
    #[serde(default)]
    pub custom_walls: Vec<Wall>,
    #[serde(default)]
    pub removed_walls: Vec<u32>,
}

/// Registry of every wall in the room and which ones are active.
#[derive(Debug, Clone)]
pub struct WallRegistry {
    dimensions: RoomDimensions,
    boundary: Vec<Wall>,
    custom: Vec<Wall>,
    removed: BTreeSet<u32>,
    next_number: u32,
}

impl WallRegistry {
    /// A registry with the four boundary walls of `dimensions` and no custom walls.
    #[must_use]
    pub fn new(dimensions: RoomDimensions) -> Self {
        Self {
            dimensions,
            boundary: boundary_walls(dimensions),
            custom: Vec::new(),
            removed: BTreeSet::new(),
            next_number: FIRST_CUSTOM_WALL_NUMBER,
        }
    }

    /// Rebuild a registry from its persisted form.
    ///
    /// # Errors
    ///
    /// Fails when a stored custom wall is degenerate or its number is reserved
    /// or repeated.
    pub fn from_snapshot(snapshot: WallSnapshot) -> Result<Self, LayoutError> {
        let mut registry = Self::new(snapshot.dimensions);
        for wall in snapshot.custom_walls {
            registry.insert_custom_wall(wall)?;
        }
        let removed: BTreeSet<u32> =
            snapshot.removed_walls.into_iter().filter(|n| registry.wall(*n).is_some()).collect();
        registry.removed = removed;
        Ok(registry)
    }

    #[must_use]
    pub fn snapshot(&self) -> WallSnapshot {
        WallSnapshot {
            dimensions: self.dimensions,
            custom_walls: self.custom.clone(),
            removed_walls: self.removed.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> RoomDimensions {
        self.dimensions
    }

    /// Change the room size. Boundary walls keep their ids and numbers.
    pub fn resize_room(&mut self, dimensions: RoomDimensions) {
        let rebuilt = boundary_walls(dimensions);
        for (old, new) in self.boundary.iter_mut().zip(rebuilt) {
            *old = Wall { id: old.id, ..new };
        }
        self.dimensions = dimensions;
    }

    /// Draw a new custom wall and give it the next wall number.
    ///
    /// # Errors
    ///
    /// Rejects zero-length walls and non-finite coordinates.
    pub fn add_custom_wall(&mut self, start: Point, end: Point, thickness: f64) -> Result<&Wall, LayoutError> {
        let wall_number = self.next_number;
        let next = wall_number.checked_add(1).ok_or(LayoutError::WallNumbersExhausted)?;
        let wall = Wall::custom(wall_number, start, end, thickness).inspect_err(|e| {
            warn!(error = %e, "rejected custom wall");
        })?;
        self.next_number = next;
        debug!(wall_number, "custom wall added");
        let idx = self.custom.len();
        self.custom.push(wall);
        Ok(&self.custom[idx])
    }

    /// Add a stored custom wall, keeping its id and number.
    ///
    /// # Errors
    ///
    /// Rejects degenerate walls, numbers reserved for boundary walls, numbers
    /// already in use, and `u32::MAX` (no number would be left to draw with).
    pub fn insert_custom_wall(&mut self, mut wall: Wall) -> Result<(), LayoutError> {
        validate_wall(wall.start(), wall.end(), wall.thickness)?;
        if wall.wall_number < FIRST_CUSTOM_WALL_NUMBER {
            return Err(LayoutError::ReservedWallNumber(wall.wall_number));
        }
        if self.custom.iter().any(|w| w.wall_number == wall.wall_number) {
            return Err(LayoutError::DuplicateWallNumber(wall.wall_number));
        }
        let next = wall.wall_number.checked_add(1).ok_or(LayoutError::WallNumbersExhausted)?;
        wall.kind = WallKind::Custom;
        self.next_number = self.next_number.max(next);
        self.custom.push(wall);
        Ok(())
    }

    /// Deactivate a wall. Removing an already-removed wall is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownWall`] for numbers the registry does not know.
    pub fn remove_wall(&mut self, wall_number: u32) -> Result<(), LayoutError> {
        if self.wall(wall_number).is_none() {
            return Err(LayoutError::UnknownWall(wall_number));
        }
        if self.removed.insert(wall_number) {
            debug!(wall_number, "wall removed");
        }
        Ok(())
    }

    /// Reactivate a removed wall.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownWall`] for numbers the registry does not know.
    pub fn restore_wall(&mut self, wall_number: u32) -> Result<(), LayoutError> {
        if self.wall(wall_number).is_none() {
            return Err(LayoutError::UnknownWall(wall_number));
        }
        if self.removed.remove(&wall_number) {
            debug!(wall_number, "wall restored");
        }
        Ok(())
    }

    /// Whether wall `n` exists and has not been removed.
    #[must_use]
    pub fn is_active(&self, wall_number: u32) -> bool {
        self.wall(wall_number).is_some() && !self.removed.contains(&wall_number)
    }

    /// Any active wall may be removed, boundary walls included.
    #[must_use]
    pub fn is_removable(&self, wall_number: u32) -> bool {
        self.is_active(wall_number)
    }

    /// Look up a wall by number, active or not.
    #[must_use]
    pub fn wall(&self, wall_number: u32) -> Option<&Wall> {
        self.boundary.iter().chain(&self.custom).find(|w| w.wall_number == wall_number)
    }

    /// Active walls, boundary walls first, then custom walls in creation order.
    pub fn active_walls(&self) -> impl Iterator<Item = &Wall> {
        self.boundary.iter().chain(&self.custom).filter(|w| !self.removed.contains(&w.wall_number))
    }

    /// Active walls of one kind, in the same order as [`Self::active_walls`].
    pub fn active_walls_of(&self, kind: WallKind) -> impl Iterator<Item = &Wall> {
        self.active_walls().filter(move |w| w.kind == kind)
    }

    /// Every custom wall, removed ones included.
    #[must_use]
    pub fn custom_walls(&self) -> &[Wall] {
        &self.custom
    }

    /// Numbers of boundary walls still standing.
    #[must_use]
    pub fn original_walls(&self) -> BTreeSet<u32> {
        self.active_walls_of(WallKind::Boundary).map(|w| w.wall_number).collect()
    }

    /// Numbers of every active wall.
    #[must_use]
    pub fn all_available_walls(&self) -> BTreeSet<u32> {
        self.active_walls().map(|w| w.wall_number).collect()
    }

    #[must_use]
    pub fn removed_walls(&self) -> &BTreeSet<u32> {
        &self.removed
    }

    /// Walls that count as paid modifications: removed boundary walls and
    /// active custom walls, sorted by number.
    #[must_use]
    pub fn chargeable_walls(&self) -> Vec<u32> {
        let removed_originals = self.boundary.iter().filter(|w| self.removed.contains(&w.wall_number));
        let added = self.active_walls_of(WallKind::Custom);
        let mut numbers: Vec<u32> = removed_originals.chain(added).map(|w| w.wall_number).collect();
        numbers.sort_unstable();
        numbers
    }

    /// Move one endpoint of a custom wall.
    ///
    /// # Errors
    ///
    /// Fails for unknown or boundary walls, and when the move would collapse
    /// the wall to a point. The wall is unchanged on error.
    pub fn move_wall_endpoint(&mut self, wall_number: u32, end: WallEnd, to: Point) -> Result<(), LayoutError> {
        let wall = self.custom_wall_mut(wall_number)?;
        let (start, finish) = match end {
            WallEnd::Start => (to, wall.end()),
            WallEnd::End => (wall.start(), to),
        };
        validate_wall(start, finish, wall.thickness)?;
        set_endpoints(wall, start, finish);
        Ok(())
    }

    /// Rotate a custom wall about its midpoint by `degrees` (clockwise, y down).
    ///
    /// # Errors
    ///
    /// Fails for unknown or boundary walls.
    pub fn rotate_wall(&mut self, wall_number: u32, degrees: f64) -> Result<(), LayoutError> {
        let wall = self.custom_wall_mut(wall_number)?;
        let mid = Point::new((wall.x1 + wall.x2) / 2.0, (wall.y1 + wall.y2) / 2.0);
        let (sin, cos) = degrees.to_radians().sin_cos();
        let rotate = |p: Point| {
            let d = p - mid;
            Point::new(mid.x + d.x * cos - d.y * sin, mid.y + d.x * sin + d.y * cos)
        };
        let (start, finish) = (rotate(wall.start()), rotate(wall.end()));
        validate_wall(start, finish, wall.thickness)?;
        set_endpoints(wall, start, finish);
        debug!(wall_number, degrees, "wall rotated");
        Ok(())
    }

    fn custom_wall_mut(&mut self, wall_number: u32) -> Result<&mut Wall, LayoutError> {
        if self.boundary.iter().any(|w| w.wall_number == wall_number) {
            return Err(LayoutError::BoundaryWall(wall_number));
        }
        self.custom
            .iter_mut()
            .find(|w| w.wall_number == wall_number)
            .ok_or(LayoutError::UnknownWall(wall_number))
    }
}

fn set_endpoints(wall: &mut Wall, start: Point, end: Point) {
    wall.x1 = start.x;
    wall.y1 = start.y;
    wall.x2 = end.x;
    wall.y2 = end.y;
}

fn boundary_walls(dim: RoomDimensions) -> Vec<Wall> {
    let tl = Point::new(0.0, 0.0);
    let tr = Point::new(dim.width, 0.0);
    let br = Point::new(dim.width, dim.height);
    let bl = Point::new(0.0, dim.height);
    [(1, tl, tr), (2, tr, br), (3, br, bl), (4, bl, tl)]
        .into_iter()
        .map(|(n, a, b)| Wall::boundary(n, a, b, BOUNDARY_WALL_THICKNESS_PX))
        .collect()
}
