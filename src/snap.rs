//! Snap resolution for dragged elements and wall endpoints.
//!
//! Strategies run in a fixed priority order and the first one to move an
//! axis owns that axis for the rest of the pass:
//!
//! 1. wall endpoint (only for wall drawing, see [`resolve_wall_point`])
//! 2. room boundary (cabinets only, against active boundary walls)
//! 3. cabinet edge to cabinet edge
//! 4. cabinet to custom-wall face (moves both axes, so only when nothing
//!    else snapped)
//!
//! The result is then clamped into the room and, if a custom wall still
//! crosses the footprint, nudged to the nearest collision-free grid offset.
//! Ties everywhere go to the first candidate in the caller's list order.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::collision::{door_clearance_collision, element_collision, wall_collision};
use crate::config::{LayoutConfig, SnapConfig};
use crate::geom::{Rect, distance};
use crate::model::{DoorClearanceZone, Element, RoomDimensions, Wall, WallKind};
use crate::transform::Point;
use crate::walls::WallRegistry;

/// Borrowed view of the room for one query. Nothing here is retained.
#[derive(Debug, Clone, Copy)]
pub struct RoomScene<'a> {
    pub elements: &'a [Element],
    pub walls: &'a WallRegistry,
    pub catalog: &'a Catalog,
    pub clearance_zones: &'a [DoorClearanceZone],
}

impl RoomScene<'_> {
    #[must_use]
    pub fn room(&self) -> RoomDimensions {
        self.walls.dimensions()
    }
}

/// Which strategy produced a snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SnapKind {
    RoomBoundary,
    Cabinet,
    CustomWall,
}

/// Outcome of snapping a wall-drawing point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSnap {
    pub point: Point,
    pub snapped: bool,
    /// Wall whose endpoint was taken.
    pub wall_number: Option<u32>,
}

/// Outcome of resolving an element move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapOutcome {
    /// Element top-left to apply.
    pub x: f64,
    pub y: f64,
    /// First strategy that moved the element, if any.
    pub snap: Option<SnapKind>,
    /// Direction of the custom wall snapped to, for optional auto-rotation.
    pub wall_angle: Option<f64>,
    pub wall_number: Option<u32>,
    /// A wall still crosses the footprint after the fallback search.
    pub collision_unresolved: bool,
    /// The final position overlaps another cabinet in its height band.
    pub element_collision: bool,
    /// The final position intrudes on a door clearance zone.
    pub door_clearance: bool,
}

/// Per-axis snap result. `None` leaves the axis free for later strategies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisSnap {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Result of snapping to a custom wall face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSnap {
    /// Footprint top-left.
    pub x: f64,
    pub y: f64,
    pub wall_angle: f64,
    pub wall_number: u32,
}

// =============================================================
// Wall endpoints
// =============================================================

/// Snap `point` to the nearest endpoint of another wall within `threshold`.
///
/// `editing` names the wall being edited so its own endpoints are skipped.
/// Equal distances keep the first wall in iteration order.
#[must_use]
pub fn snap_to_wall_endpoint<'a>(
    point: Point,
    walls: impl IntoIterator<Item = &'a Wall>,
    editing: Option<u32>,
    threshold: f64,
) -> PointSnap {
    let mut best: Option<(f64, Point, u32)> = None;
    for wall in walls {
        if Some(wall.wall_number) == editing {
            continue;
        }
        let Some(segment) = wall.segment() else {
            continue;
        };
        for endpoint in [segment.a, segment.b] {
            let d = distance(point, endpoint);
            if d <= threshold && best.is_none_or(|(best_d, _, _)| d < best_d) {
                best = Some((d, endpoint, wall.wall_number));
            }
        }
    }
    match best {
        Some((_, endpoint, wall_number)) => PointSnap { point: endpoint, snapped: true, wall_number: Some(wall_number) },
        None => PointSnap { point, snapped: false, wall_number: None },
    }
}

/// Snap a point of a wall being drawn or edited against every active wall.
#[must_use]
pub fn resolve_wall_point(point: Point, walls: &WallRegistry, editing: Option<u32>, config: &SnapConfig) -> PointSnap {
    let result = snap_to_wall_endpoint(point, walls.active_walls(), editing, config.wall_endpoint_px);
    if result.snapped {
        debug!(x = result.point.x, y = result.point.y, wall = ?result.wall_number, "wall point snapped to endpoint");
    }
    result
}

// =============================================================
// Room boundary
// =============================================================

/// Snap `rect` flush to room edges within `threshold`.
///
/// Only edges whose boundary wall is active take part (1 top, 2 right,
/// 3 bottom, 4 left). When both opposite edges are in range the nearer one
/// wins, left/top on a tie.
#[must_use]
pub fn snap_to_room_boundary(rect: &Rect, room: RoomDimensions, walls: &WallRegistry, threshold: f64) -> AxisSnap {
    let pick = |near_dist: f64, near_active: bool, far_dist: f64, far_active: bool, near: f64, far: f64| {
        let near_ok = near_active && near_dist <= threshold;
        let far_ok = far_active && far_dist <= threshold;
        match (near_ok, far_ok) {
            (true, true) if far_dist < near_dist => Some(far),
            (true, _) => Some(near),
            (false, true) => Some(far),
            (false, false) => None,
        }
    };
    AxisSnap {
        x: pick(
            rect.x.abs(),
            walls.is_active(4),
            (room.width - rect.right()).abs(),
            walls.is_active(2),
            0.0,
            room.width - rect.width,
        ),
        y: pick(
            rect.y.abs(),
            walls.is_active(1),
            (room.height - rect.bottom()).abs(),
            walls.is_active(3),
            0.0,
            room.height - rect.height,
        ),
    }
}

/// Clamp `rect`'s origin into `[0, W - w] × [0, H - h]`. A room smaller than
/// the rect pins it to 0.
#[must_use]
pub fn clamp_to_room(rect: &Rect, room: RoomDimensions) -> Rect {
    let x = rect.x.min(room.width - rect.width).max(0.0);
    let y = rect.y.min(room.height - rect.height).max(0.0);
    Rect::new(x, y, rect.width, rect.height)
}

// =============================================================
// Cabinet to cabinet
// =============================================================

/// Snap `rect` edge-to-edge against other cabinet footprints.
///
/// Considers right-to-left, left-to-right, bottom-to-top, and top-to-bottom
/// pairs on axes that are not `locked`, and applies only the single closest
/// pair. `accept` sees each candidate rect with the axis it would move and
/// can veto it; vetoed pairs are skipped, not clamped.
#[must_use]
pub fn snap_to_cabinets(
    rect: &Rect,
    others: &[Rect],
    threshold: f64,
    locked: AxisSnap,
    accept: impl Fn(&Rect, AxisSnap) -> bool,
) -> AxisSnap {
    let mut candidates: Vec<(f64, AxisSnap)> = Vec::new();
    for other in others {
        let side_by_side = rect.y < other.bottom() + threshold && rect.bottom() > other.y - threshold;
        let front_to_back = rect.x < other.right() + threshold && rect.right() > other.x - threshold;
        if locked.x.is_none() && side_by_side {
            candidates.push(((rect.x - other.right()).abs(), AxisSnap { x: Some(other.right()), y: None }));
            candidates.push(((rect.right() - other.x).abs(), AxisSnap { x: Some(other.x - rect.width), y: None }));
        }
        if locked.y.is_none() && front_to_back {
            candidates.push(((rect.y - other.bottom()).abs(), AxisSnap { x: None, y: Some(other.bottom()) }));
            candidates.push(((rect.bottom() - other.y).abs(), AxisSnap { x: None, y: Some(other.y - rect.height) }));
        }
    }

    let mut best: Option<(f64, AxisSnap)> = None;
    for (dist, snap) in candidates {
        if dist > threshold || best.is_some_and(|(best_dist, _)| dist >= best_dist) {
            continue;
        }
        let moved = Rect::new(snap.x.unwrap_or(rect.x), snap.y.unwrap_or(rect.y), rect.width, rect.height);
        if accept(&moved, snap) {
            best = Some((dist, snap));
        }
    }
    best.map(|(_, snap)| snap).unwrap_or_default()
}

// =============================================================
// Cabinet to custom wall
// =============================================================

/// Snap `rect` against the face of the nearest custom wall.
///
/// The rect's center is projected onto each wall segment; the closest wall
/// whose projection lies within `threshold` wins. The rect is then pushed
/// off the wall's centerline by half the wall thickness, half the rect's
/// smaller side, and `face_gap`, on whichever side its center was on.
#[must_use]
pub fn snap_to_custom_walls<'a>(
    rect: &Rect,
    walls: impl IntoIterator<Item = &'a Wall>,
    threshold: f64,
    face_gap: f64,
) -> Option<WallSnap> {
    let center = rect.center();
    let mut best: Option<(f64, Point, &Wall)> = None;
    for wall in walls {
        let Some(segment) = wall.segment() else {
            continue;
        };
        let (closest, _) = segment.project(center);
        let d = distance(center, closest);
        if d <= threshold && best.is_none_or(|(best_d, ..)| d < best_d) {
            best = Some((d, closest, wall));
        }
    }
    let (_, closest, wall) = best?;
    let segment = wall.segment()?;

    let dir = segment.b - segment.a;
    let len = segment.length();
    // Left-hand normal in y-down space; flip it toward the rect's center.
    let mut normal = Point::new(-dir.y / len, dir.x / len);
    let to_center = center - closest;
    if to_center.x * normal.x + to_center.y * normal.y < 0.0 {
        normal = Point::new(-normal.x, -normal.y);
    }
    let offset = wall.thickness / 2.0 + rect.width.min(rect.height) / 2.0 + face_gap;
    let new_center = Point::new(closest.x + normal.x * offset, closest.y + normal.y * offset);
    Some(WallSnap {
        x: new_center.x - rect.width / 2.0,
        y: new_center.y - rect.height / 2.0,
        wall_angle: segment.angle_deg(),
        wall_number: wall.wall_number,
    })
}

// =============================================================
// Collision fallback
// =============================================================

/// Grid offsets searched around a colliding position, nearest first.
///
/// Within one distance, horizontal offsets come before vertical ones and
/// positive before negative.
#[must_use]
pub fn search_offsets(radius: f64, step: f64) -> Vec<(f64, f64)> {
    if !step.is_finite() || !radius.is_finite() || step <= 0.0 || radius < step {
        return Vec::new();
    }
    // capped so a misconfigured radius cannot blow up the scan
    #[allow(clippy::cast_possible_truncation)]
    let n = (radius / step).floor().min(64.0) as i32;
    let order: Vec<i32> = std::iter::once(0).chain((1..=n).flat_map(|k| [k, -k])).collect();
    let mut offsets: Vec<(i32, i32)> =
        order.iter().flat_map(|&j| order.iter().map(move |&i| (i, j))).filter(|&(i, j)| i != 0 || j != 0).collect();
    offsets.sort_by_key(|&(i, j)| i * i + j * j);
    offsets.into_iter().map(|(i, j)| (f64::from(i) * step, f64::from(j) * step)).collect()
}

/// Find the first grid offset of `rect` that no wall crosses and that stays
/// in the room. `None` when the whole neighborhood collides.
#[must_use]
pub fn avoid_wall_collision(rect: &Rect, walls: &[&Wall], room: RoomDimensions, config: &SnapConfig) -> Option<Rect> {
    let bounds = room.bounds();
    search_offsets(config.search_radius_px, config.search_step_px)
        .into_iter()
        .map(|(dx, dy)| rect.translated(dx, dy))
        .filter(|candidate| bounds.contains_rect(candidate))
        .find(|candidate| {
            !wall_collision(candidate.x, candidate.y, candidate.width, candidate.height, walls.iter().copied())
        })
}

// =============================================================
// Full resolution
// =============================================================

/// Resolve where `element` lands when dragged so its top-left is at `(x, y)`.
#[must_use]
pub fn resolve_move(element: &Element, x: f64, y: f64, scene: &RoomScene<'_>, config: &LayoutConfig) -> SnapOutcome {
    let room = scene.room();
    let moved = element.moved_to(x, y);
    let footprint = moved.footprint();
    // Footprint origin relative to the element origin; zero for quarter turns.
    let (off_x, off_y) = (footprint.x - x, footprint.y - y);

    // Dragging past a wall pins to it before any snap is considered.
    let mut rect = clamp_to_room(&footprint, room);
    let mut snap: Option<SnapKind> = None;
    let mut locked = AxisSnap::default();
    let mut wall_angle = None;
    let mut wall_number = None;

    let mut apply = |rect: &mut Rect, result: AxisSnap, kind: SnapKind, locked: &mut AxisSnap| {
        if let Some(sx) = result.x {
            rect.x = sx;
            locked.x = Some(sx);
        }
        if let Some(sy) = result.y {
            rect.y = sy;
            locked.y = Some(sy);
        }
        if result != AxisSnap::default() && snap.is_none() {
            snap = Some(kind);
        }
    };

    if element.is_cabinet() {
        let boundary = snap_to_room_boundary(&rect, room, scene.walls, config.snap.boundary_px);
        apply(&mut rect, boundary, SnapKind::RoomBoundary, &mut locked);
    }

    if locked.x.is_none() || locked.y.is_none() {
        let others: Vec<Rect> = scene
            .elements
            .iter()
            .filter(|e| e.is_cabinet() && e.id != element.id)
            .map(Element::footprint)
            .collect();
        let bounds = room.bounds();
        let boundary_px = element.is_cabinet().then_some(config.snap.boundary_px);
        // A cabinet snap may not land where the room would clamp it or where
        // the boundary snap would pull it on the next move.
        let accept = |candidate: &Rect, moved: AxisSnap| {
            if !bounds.contains_rect(candidate) {
                return false;
            }
            let Some(threshold) = boundary_px else {
                return true;
            };
            let flush = snap_to_room_boundary(candidate, room, scene.walls, threshold);
            (moved.x.is_none() || flush.x.is_none()) && (moved.y.is_none() || flush.y.is_none())
        };
        let cabinet = snap_to_cabinets(&rect, &others, config.snap.cabinet_px, locked, accept);
        apply(&mut rect, cabinet, SnapKind::Cabinet, &mut locked);
    }

    let custom_walls: Vec<&Wall> = scene.walls.active_walls_of(WallKind::Custom).collect();
    if locked == AxisSnap::default() {
        if let Some(ws) = snap_to_custom_walls(
            &rect,
            custom_walls.iter().copied(),
            config.snap.custom_wall_px,
            config.snap.wall_face_gap_px,
        ) {
            rect.x = ws.x;
            rect.y = ws.y;
            wall_angle = Some(ws.wall_angle);
            wall_number = Some(ws.wall_number);
            snap = Some(SnapKind::CustomWall);
        }
    }

    rect = clamp_to_room(&rect, room);

    let mut collision_unresolved = false;
    if wall_collision(rect.x, rect.y, rect.width, rect.height, custom_walls.iter().copied()) {
        match avoid_wall_collision(&rect, &custom_walls, room, &config.snap) {
            Some(free) => rect = free,
            None => {
                collision_unresolved = true;
                warn!(id = %element.id, x = rect.x, y = rect.y, "no collision-free position within search radius");
            }
        }
    }

    let placed = element.moved_to(rect.x - off_x, rect.y - off_y);
    let outcome = SnapOutcome {
        x: placed.x,
        y: placed.y,
        snap,
        wall_angle,
        wall_number,
        collision_unresolved,
        element_collision: element_collision(&placed, Some(element.id), scene.elements, scene.catalog, config),
        door_clearance: door_clearance_collision(&rect, scene.clearance_zones),
    };
    if let Some(kind) = outcome.snap {
        debug!(id = %element.id, ?kind, x = outcome.x, y = outcome.y, "element snapped");
    }
    outcome
}
