#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;
use crate::catalog::Catalog;
use crate::model::{Category, DoorClearanceZone, RoomDimensions};
use crate::walls::WallRegistry;

const EPSILON: f64 = 1e-9;

// =============================================================
// Helpers
// =============================================================

struct Room {
    walls: WallRegistry,
    elements: Vec<Element>,
    catalog: Catalog,
    zones: Vec<DoorClearanceZone>,
}

impl Room {
    fn new() -> Self {
        Self {
            walls: WallRegistry::new(RoomDimensions::new(120.0, 96.0)),
            elements: Vec::new(),
            catalog: Catalog::new(),
            zones: Vec::new(),
        }
    }

    fn scene(&self) -> RoomScene<'_> {
        RoomScene { elements: &self.elements, walls: &self.walls, catalog: &self.catalog, clearance_zones: &self.zones }
    }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn identity_engine() -> EngineCore {
    let mut core = EngineCore::default();
    core.set_screen_ctm(Some(ScreenMatrix::identity()));
    core
}

fn room_with_cabinet() -> (Room, Element) {
    let mut room = Room::new();
    let el = Element::new("base-24", Category::Cabinet, 50.0, 40.0, 24.0, 24.0);
    room.elements.push(el.clone());
    (room, el)
}

// =============================================================
// Coordinates
// =============================================================

#[test]
fn missing_screen_matrix_maps_to_origin() {
    let core = EngineCore::default();
    assert_eq!(core.to_design(pt(300.0, 200.0)), pt(0.0, 0.0));
}

#[test]
fn scaled_matrix_is_inverted() {
    let mut core = EngineCore::default();
    core.set_screen_ctm(Some(ScreenMatrix::scale_translate(2.0, 100.0, 50.0)));
    let p = core.to_design(pt(220.0, 150.0));
    assert!((p.x - 60.0).abs() < EPSILON);
    assert!((p.y - 50.0).abs() < EPSILON);
}

// =============================================================
// Drag
// =============================================================

#[test]
fn drag_previews_then_commits() {
    let (room, el) = room_with_cabinet();
    let mut core = identity_engine();

    assert!(core.on_pointer_down(pt(60.0, 50.0), 0.0, Some(&el)).is_empty());
    assert_eq!(core.drag_session(), Some(DragSession { id: el.id, grab: pt(10.0, 10.0) }));

    let actions = core.on_pointer_move(pt(90.0, 52.0), &room.scene());
    let [Action::PreviewPosition { id, outcome }] = actions.as_slice() else {
        panic!("expected one preview, got {actions:?}");
    };
    assert_eq!(*id, el.id);
    assert_eq!((outcome.x, outcome.y), (80.0, 42.0));

    let actions = core.on_pointer_up(pt(90.0, 52.0), 100.0, &room.scene());
    let [Action::CommitPosition { outcome, .. }] = actions.as_slice() else {
        panic!("expected one commit, got {actions:?}");
    };
    assert_eq!((outcome.x, outcome.y), (80.0, 42.0));
    assert_eq!(core.drag_session(), None);
}

#[test]
fn drag_goes_through_screen_matrix() {
    let (room, el) = room_with_cabinet();
    let mut core = EngineCore::default();
    core.set_screen_ctm(Some(ScreenMatrix::scale_translate(2.0, 100.0, 50.0)));
    core.on_pointer_down(pt(220.0, 150.0), 0.0, Some(&el));
    let actions = core.on_pointer_move(pt(280.0, 154.0), &room.scene());
    let [Action::PreviewPosition { outcome, .. }] = actions.as_slice() else {
        panic!("expected one preview, got {actions:?}");
    };
    assert!((outcome.x - 80.0).abs() < EPSILON);
    assert!((outcome.y - 42.0).abs() < EPSILON);
}

#[test]
fn drag_preview_is_snapped() {
    let (room, el) = room_with_cabinet();
    let mut core = identity_engine();
    core.on_pointer_down(pt(60.0, 50.0), 0.0, Some(&el));
    // proposed origin (5, 42) snaps to the left wall
    let actions = core.on_pointer_move(pt(15.0, 52.0), &room.scene());
    let [Action::PreviewPosition { outcome, .. }] = actions.as_slice() else {
        panic!("expected one preview, got {actions:?}");
    };
    assert_eq!((outcome.x, outcome.y), (0.0, 42.0));
}

#[test]
fn element_removed_mid_drag_yields_no_preview() {
    let (mut room, el) = room_with_cabinet();
    let mut core = identity_engine();
    core.on_pointer_down(pt(60.0, 50.0), 0.0, Some(&el));
    room.elements.clear();
    assert!(core.on_pointer_move(pt(90.0, 52.0), &room.scene()).is_empty());
}

#[test]
fn zoom_cancels_drag_session() {
    let (room, el) = room_with_cabinet();
    let mut core = identity_engine();
    core.on_pointer_down(pt(60.0, 50.0), 0.0, Some(&el));
    core.on_pointer_move(pt(90.0, 52.0), &room.scene());
    let actions = core.zoom_in();
    assert_eq!(actions[0], Action::DragCancelled { id: el.id });
    assert!(matches!(actions[1], Action::ZoomChanged { .. }));
    assert_eq!(core.drag_session(), None);
    assert!(core.on_pointer_up(pt(90.0, 52.0), 50.0, &room.scene()).is_empty());
}

#[test]
fn touch_drag_and_pinch() {
    let (room, el) = room_with_cabinet();
    let mut core = identity_engine();
    core.on_touch_start(&[pt(60.0, 50.0)], 0.0, Some(&el));
    let actions = core.on_touch_move(&[pt(90.0, 52.0)], &room.scene());
    assert!(matches!(actions.as_slice(), [Action::PreviewPosition { .. }]));

    let actions = core.on_touch_start(&[pt(90.0, 52.0), pt(190.0, 52.0)], 10.0, None);
    assert_eq!(actions, vec![Action::DragCancelled { id: el.id }]);
    assert_eq!(core.drag_session(), None);

    let actions = core.on_touch_move(&[pt(90.0, 52.0), pt(290.0, 52.0)], &room.scene());
    assert_eq!(actions, vec![Action::ZoomChanged { zoom: 2.0 }]);
    assert_eq!(core.zoom(), 2.0);
    assert!(core.on_touch_end(0, &[pt(90.0, 52.0), pt(290.0, 52.0)], 40.0, &room.scene()).is_empty());
}

#[test]
fn stray_touch_does_not_replace_drag_session() {
    let (room, el) = room_with_cabinet();
    let other = Element::new("base-24", Category::Cabinet, 0.0, 0.0, 24.0, 24.0);
    let mut core = identity_engine();
    core.on_touch_start(&[pt(60.0, 50.0)], 0.0, Some(&el));
    assert!(core.on_touch_start(&[pt(10.0, 10.0)], 5.0, Some(&other)).is_empty());
    assert_eq!(core.drag_session(), Some(DragSession { id: el.id, grab: pt(10.0, 10.0) }));

    let actions = core.on_touch_move(&[pt(90.0, 52.0)], &room.scene());
    let [Action::PreviewPosition { id, outcome }] = actions.as_slice() else {
        panic!("expected one preview, got {actions:?}");
    };
    assert_eq!(*id, el.id);
    assert_eq!((outcome.x, outcome.y), (80.0, 42.0));
}

// =============================================================
// Tap / long press
// =============================================================

#[test]
fn tap_reports_design_point() {
    let (room, el) = room_with_cabinet();
    let mut core = EngineCore::default();
    core.set_screen_ctm(Some(ScreenMatrix::scale_translate(2.0, 0.0, 0.0)));
    core.on_pointer_down(pt(120.0, 100.0), 0.0, Some(&el));
    let actions = core.on_pointer_up(pt(120.0, 100.0), 30.0, &room.scene());
    assert_eq!(actions, vec![Action::Tap { target: Some(el.id), at: pt(60.0, 50.0) }]);
}

#[test]
fn long_press_cancels_drag_and_reports() {
    let (_room, el) = room_with_cabinet();
    let mut core = identity_engine();
    core.on_pointer_down(pt(60.0, 50.0), 0.0, Some(&el));
    let actions = core.on_long_press_timer(600.0);
    assert_eq!(
        actions,
        vec![Action::DragCancelled { id: el.id }, Action::LongPress { target: Some(el.id), at: pt(60.0, 50.0) }]
    );
    assert_eq!(core.drag_session(), None);
}

// =============================================================
// Walls
// =============================================================

#[test]
fn wall_point_snap_action() {
    let mut room = Room::new();
    room.walls.add_custom_wall(pt(40.0, 0.0), pt(40.0, 50.0), 4.0).unwrap();
    let core = identity_engine();
    let action = core.snap_wall_point(pt(45.0, 3.0), &room.scene(), None);
    assert_eq!(action, Action::WallPointSnapped { point: pt(40.0, 0.0), snapped: true, wall_number: Some(5) });
}

#[test]
fn wall_rotate_under_zoom() {
    let room = Room::new();
    let mut core = EngineCore::default();
    core.set_screen_ctm(Some(ScreenMatrix::scale_translate(2.0, 10.0, 10.0)));
    // pivot (50, 50) sits at client (110, 110)
    core.begin_wall_rotate(5, pt(50.0, 50.0), pt(130.0, 110.0));
    let actions = core.on_pointer_move(pt(110.0, 130.0), &room.scene());
    let [Action::RotateWall { wall_number: 5, degrees, committed: false }] = actions.as_slice() else {
        panic!("expected live rotate, got {actions:?}");
    };
    assert!((degrees - 90.0).abs() < EPSILON);
    let actions = core.on_pointer_up(pt(110.0, 130.0), 10.0, &room.scene());
    assert!(matches!(actions.as_slice(), [Action::RotateWall { committed: true, .. }]));
}

// =============================================================
// Drop
// =============================================================

#[test]
fn palette_drop_is_centered_and_snapped() {
    let room = Room::new();
    let core = identity_engine();
    let el = Element::new("base-24", Category::Cabinet, 0.0, 0.0, 24.0, 24.0);
    let outcome = core.resolve_drop(&el, pt(17.0, 62.0), &room.scene());
    assert_eq!((outcome.x, outcome.y), (0.0, 50.0));
}

// =============================================================
// Serialization
// =============================================================

#[test]
fn action_serializes_with_type_tag() {
    let value = serde_json::to_value(Action::ZoomChanged { zoom: 2.0 }).unwrap();
    assert_eq!(value, json!({ "type": "zoomChanged", "zoom": 2.0 }));
}
