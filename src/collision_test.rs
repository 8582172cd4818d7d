use proptest::prelude::*;

use super::*;
use crate::catalog::CatalogEntry;
use crate::model::Category;
use crate::transform::Point;

// =============================================================
// Helpers
// =============================================================

fn cabinet(x: f64, y: f64, w: f64, d: f64) -> Element {
    Element::new("base-24", Category::Cabinet, x, y, w, d)
}

fn stacked(x: f64, y: f64, mount: f64, height: f64) -> Element {
    let mut e = cabinet(x, y, 24.0, 24.0);
    e.mount_height = Some(mount);
    e.actual_height = Some(height);
    e
}

fn wall(x1: f64, y1: f64, x2: f64, y2: f64) -> Wall {
    Wall::custom(5, Point::new(x1, y1), Point::new(x2, y2), 4.0).unwrap()
}

fn config() -> LayoutConfig {
    LayoutConfig::default()
}

// =============================================================
// wall_collision
// =============================================================

#[test]
fn wall_crossing_rect_collides() {
    let walls = [wall(20.0, 0.0, 20.0, 100.0)];
    assert!(wall_collision(10.0, 10.0, 24.0, 24.0, &walls));
}

#[test]
fn wall_clear_of_rect_does_not_collide() {
    let walls = [wall(50.0, 0.0, 50.0, 100.0)];
    assert!(!wall_collision(10.0, 10.0, 24.0, 24.0, &walls));
}

#[test]
fn wall_inside_rect_is_not_detected() {
    let walls = [wall(15.0, 15.0, 25.0, 25.0)];
    assert!(!wall_collision(10.0, 10.0, 24.0, 24.0, &walls));
}

#[test]
fn wall_with_missing_endpoint_is_skipped() {
    let mut broken = wall(20.0, 0.0, 20.0, 100.0);
    broken.y2 = f64::NAN;
    assert!(!wall_collision(10.0, 10.0, 24.0, 24.0, &[broken]));
}

#[test]
fn any_wall_in_list_triggers() {
    let walls = [wall(90.0, 0.0, 90.0, 10.0), wall(0.0, 20.0, 100.0, 20.0)];
    assert!(wall_collision(10.0, 10.0, 24.0, 24.0, &walls));
}

#[test]
fn no_walls_no_collision() {
    let walls: [Wall; 0] = [];
    assert!(!wall_collision(10.0, 10.0, 24.0, 24.0, &walls));
}

// =============================================================
// element_collision
// =============================================================

#[test]
fn overlapping_cabinets_collide() {
    let existing = cabinet(0.0, 0.0, 24.0, 24.0);
    let candidate = cabinet(12.0, 0.0, 24.0, 24.0);
    let elements = [existing];
    assert!(element_collision(&candidate, Some(candidate.id), &elements, &Catalog::new(), &config()));
}

#[test]
fn flush_cabinets_do_not_collide() {
    let elements = [cabinet(0.0, 0.0, 24.0, 24.0)];
    let candidate = cabinet(24.0, 0.0, 24.0, 24.0);
    assert!(!element_collision(&candidate, None, &elements, &Catalog::new(), &config()));
}

#[test]
fn slight_overlap_within_tolerance_is_allowed() {
    let elements = [cabinet(0.0, 0.0, 24.0, 24.0)];
    let candidate = cabinet(19.5, 0.0, 24.0, 24.0);
    assert!(!element_collision(&candidate, None, &elements, &Catalog::new(), &config()));
    let candidate = cabinet(18.0, 0.0, 24.0, 24.0);
    assert!(element_collision(&candidate, None, &elements, &Catalog::new(), &config()));
}

#[test]
fn excluded_id_is_ignored() {
    let existing = cabinet(0.0, 0.0, 24.0, 24.0);
    let candidate = cabinet(0.0, 0.0, 24.0, 24.0);
    let elements = [existing.clone()];
    assert!(!element_collision(&candidate, Some(existing.id), &elements, &Catalog::new(), &config()));
}

#[test]
fn candidate_does_not_collide_with_itself() {
    let candidate = cabinet(0.0, 0.0, 24.0, 24.0);
    let elements = [candidate.clone()];
    assert!(!element_collision(&candidate, None, &elements, &Catalog::new(), &config()));
}

#[test]
fn non_cabinets_are_ignored() {
    let fridge = Element::new("fridge-36", Category::Appliance, 0.0, 0.0, 36.0, 30.0);
    let candidate = cabinet(10.0, 0.0, 24.0, 24.0);
    assert!(!element_collision(&candidate, None, &[fridge], &Catalog::new(), &config()));
}

#[test]
fn rotated_footprint_is_used() {
    // 48x12 rotated 90 occupies x 0..12, y 0..48.
    let mut long = cabinet(0.0, 0.0, 48.0, 12.0);
    long.rotation = 90.0;
    let candidate = cabinet(0.0, 30.0, 24.0, 24.0);
    assert!(element_collision(&candidate, None, &[long.clone()], &Catalog::new(), &config()));
    let beside = cabinet(12.0, 30.0, 24.0, 24.0);
    assert!(!element_collision(&beside, None, &[long], &Catalog::new(), &config()));
}

#[test]
fn stacked_wall_cabinet_above_base_does_not_collide() {
    let base = stacked(0.0, 0.0, 0.0, 34.0);
    let upper = stacked(0.0, 0.0, 54.0, 30.0);
    assert!(!element_collision(&upper, None, &[base], &Catalog::new(), &config()));
}

#[test]
fn bands_closer_than_clearance_collide() {
    let base = stacked(0.0, 0.0, 0.0, 34.0);
    let upper = stacked(0.0, 0.0, 36.0, 30.0);
    assert!(element_collision(&upper, None, &[base], &Catalog::new(), &config()));
}

#[test]
fn clearance_uses_catalog_heights_when_unset() {
    let mut catalog = Catalog::new();
    catalog.insert("base-24", CatalogEntry { default_height: Some(34.5), ..CatalogEntry::default() });
    catalog.insert("wall-30", CatalogEntry { default_height: Some(30.0), mount_height: Some(54.0), ..CatalogEntry::default() });
    let base = cabinet(0.0, 0.0, 24.0, 24.0);
    let mut upper = cabinet(0.0, 0.0, 24.0, 12.0);
    upper.kind = "wall-30".into();
    assert!(!element_collision(&upper, None, &[base], &catalog, &config()));
}

#[test]
fn colliding_element_reports_first_in_order() {
    let a = cabinet(0.0, 0.0, 24.0, 24.0);
    let b = cabinet(10.0, 0.0, 24.0, 24.0);
    let candidate = cabinet(5.0, 0.0, 24.0, 24.0);
    let elements = [a.clone(), b];
    let hit = colliding_element(&candidate, None, &elements, &Catalog::new(), &config()).unwrap();
    assert_eq!(hit.id, a.id);
}

proptest! {
    #[test]
    fn separated_bands_never_collide(
        x in -50.0f64..50.0,
        y in -50.0f64..50.0,
        lower_height in 1.0f64..60.0,
        gap in 3.01f64..40.0,
        upper_height in 1.0f64..40.0,
    ) {
        let lower = stacked(0.0, 0.0, 0.0, lower_height);
        let upper = stacked(x, y, lower_height + gap, upper_height);
        prop_assert!(!element_collision(&upper, None, &[lower], &Catalog::new(), &config()));
    }

    #[test]
    fn close_bands_with_real_overlap_always_collide(
        x in -18.9f64..18.9,
        y in -18.9f64..18.9,
        lower_height in 1.0f64..60.0,
        gap in -20.0f64..2.99,
    ) {
        let lower = stacked(0.0, 0.0, 0.0, lower_height);
        let upper = stacked(x, y, (lower_height + gap).max(0.0), 30.0);
        prop_assert!(element_collision(&upper, None, &[lower], &Catalog::new(), &config()));
    }
}

// =============================================================
// door_clearance_collision
// =============================================================

#[test]
fn axis_aligned_zone_blocks_overlap() {
    let zones = [DoorClearanceZone { x: 40.0, y: 0.0, width: 30.0, height: 30.0, rotation: None }];
    assert!(door_clearance_collision(&Rect::new(30.0, 0.0, 24.0, 24.0), &zones));
    assert!(!door_clearance_collision(&Rect::new(0.0, 0.0, 24.0, 24.0), &zones));
}

#[test]
fn touching_zone_does_not_block() {
    let zones = [DoorClearanceZone { x: 24.0, y: 0.0, width: 30.0, height: 30.0, rotation: None }];
    assert!(!door_clearance_collision(&Rect::new(0.0, 0.0, 24.0, 24.0), &zones));
}

#[test]
fn rotated_zone_blocks_conservatively() {
    // A 40x10 zone centered at (50, 50) rotated 45° has bounds 32.3..67.7 on
    // both axes. The rect near the bounds' lower-left corner misses the exact
    // rotated shape but is still blocked.
    let zones = [DoorClearanceZone { x: 30.0, y: 45.0, width: 40.0, height: 10.0, rotation: Some(45.0) }];
    assert!(door_clearance_collision(&Rect::new(33.0, 63.0, 4.0, 4.0), &zones));
    assert!(door_clearance_collision(&Rect::new(45.0, 45.0, 10.0, 10.0), &zones));
    assert!(!door_clearance_collision(&Rect::new(0.0, 0.0, 10.0, 10.0), &zones));
}

// =============================================================
// within_room
// =============================================================

#[test]
fn element_inside_room() {
    let room = RoomDimensions::new(120.0, 96.0);
    let e = cabinet(96.0, 72.0, 24.0, 24.0);
    assert!(within_room(&e, room, &[], &Catalog::new()));
}

#[test]
fn element_overhanging_room_is_out() {
    let room = RoomDimensions::new(120.0, 96.0);
    let e = cabinet(100.0, 72.0, 24.0, 24.0);
    assert!(!within_room(&e, room, &[], &Catalog::new()));
}

#[test]
fn rotated_element_checked_by_footprint() {
    let room = RoomDimensions::new(120.0, 96.0);
    let mut e = cabinet(100.0, 0.0, 36.0, 12.0);
    assert!(!within_room(&e, room, &[], &Catalog::new()));
    e.rotation = 90.0;
    assert!(within_room(&e, room, &[], &Catalog::new()));
}

#[test]
fn wall_mounted_above_element_may_overhang() {
    let room = RoomDimensions::new(120.0, 96.0);
    let base = stacked(96.0, 0.0, 0.0, 34.0);
    let upper = stacked(100.0, 0.0, 54.0, 30.0);
    assert!(within_room(&upper, room, &[base.clone()], &Catalog::new()));
    let floor = stacked(100.0, 0.0, 0.0, 34.0);
    assert!(!within_room(&floor, room, &[base], &Catalog::new()));
}
