//! Collision queries: walls, other cabinets, and door clearance zones.
//!
//! Every function is a pure query over the lists the caller passes in; there
//! is no cached scene. Rotated shapes are tested by their axis-aligned
//! bounds, which can report a collision that an exact test would not, but
//! never misses one.

#[cfg(test)]
#[path = "collision_test.rs"]
mod collision_test;

use crate::catalog::Catalog;
use crate::config::LayoutConfig;
use crate::geom::{Rect, segment_intersects_rect};
use crate::model::{DoorClearanceZone, Element, ElementId, RoomDimensions, Wall};

/// Whether any wall crosses an edge of the `width × depth` rectangle at `(x, y)`.
///
/// Walls with missing endpoints are skipped. A wall lying wholly inside the
/// rectangle crosses no edge and is not reported.
#[must_use]
pub fn wall_collision<'a>(x: f64, y: f64, width: f64, depth: f64, walls: impl IntoIterator<Item = &'a Wall>) -> bool {
    let rect = Rect::new(x, y, width, depth);
    walls
        .into_iter()
        .filter_map(Wall::segment)
        .any(|segment| segment_intersects_rect(&segment, &rect))
}

/// The first cabinet (in list order) that `candidate` collides with.
///
/// Pairs whose height bands are separated by at least the vertical
/// clearance are stacked, not colliding. Otherwise footprints overlap when
/// they intersect by more than the flush tolerance.
#[must_use]
pub fn colliding_element<'a>(
    candidate: &Element,
    exclude_id: Option<ElementId>,
    elements: &'a [Element],
    catalog: &Catalog,
    config: &LayoutConfig,
) -> Option<&'a Element> {
    let band = catalog.height_band(candidate);
    let footprint = candidate.footprint();
    elements.iter().find(|other| {
        if !other.is_cabinet() || other.id == candidate.id || Some(other.id) == exclude_id {
            return false;
        }
        if band.gap_to(&catalog.height_band(other)) >= config.vertical_clearance_in {
            return false;
        }
        footprint.overlaps_with_tolerance(&other.footprint(), config.flush_tolerance_px)
    })
}

/// Whether `candidate` collides with any other cabinet.
#[must_use]
pub fn element_collision(
    candidate: &Element,
    exclude_id: Option<ElementId>,
    elements: &[Element],
    catalog: &Catalog,
    config: &LayoutConfig,
) -> bool {
    colliding_element(candidate, exclude_id, elements, catalog, config).is_some()
}

/// Whether `candidate` overlaps any door clearance zone. Any overlap blocks.
#[must_use]
pub fn door_clearance_collision(candidate: &Rect, zones: &[DoorClearanceZone]) -> bool {
    zones.iter().any(|zone| candidate.overlaps(&zone.blocked_area()))
}

/// Whether `element`'s footprint lies inside the room.
///
/// A wall-mounted element may overhang the room edge when it hangs above
/// another element whose footprint it overlaps.
#[must_use]
pub fn within_room(element: &Element, room: RoomDimensions, elements: &[Element], catalog: &Catalog) -> bool {
    let footprint = element.footprint();
    if room.bounds().contains_rect(&footprint) {
        return true;
    }
    let band = catalog.height_band(element);
    if band.bottom <= 0.0 {
        return false;
    }
    elements.iter().any(|other| {
        other.id != element.id
            && catalog.height_band(other).top <= band.bottom
            && footprint.overlaps(&other.footprint())
    })
}
