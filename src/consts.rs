//! Shared numeric constants for the layout engine.

// ── Geometry ────────────────────────────────────────────────────

/// Segment/edge denominators below this are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-4;

/// Rotation step for placed elements, in degrees.
pub const ROTATION_STEP_DEG: f64 = 15.0;

// ── Snapping ────────────────────────────────────────────────────

/// Distance within which a wall being drawn snaps to another wall's endpoint.
pub const WALL_ENDPOINT_SNAP_PX: f64 = 12.0;

/// Distance within which a cabinet snaps flush to a room edge.
pub const BOUNDARY_SNAP_PX: f64 = 12.0;

/// Distance within which a cabinet snaps edge-to-edge to another cabinet.
pub const CABINET_SNAP_PX: f64 = 8.0;

/// Distance from a custom wall within which a cabinet snaps to its face.
pub const CUSTOM_WALL_SNAP_PX: f64 = 8.0;

/// Gap left between a cabinet edge and the face of a custom wall.
pub const WALL_FACE_GAP_PX: f64 = 2.0;

/// Radius of the neighborhood searched for a collision-free position.
pub const COLLISION_SEARCH_RADIUS_PX: f64 = 20.0;

/// Grid step of the collision-avoidance search.
pub const COLLISION_SEARCH_STEP_PX: f64 = 5.0;

// ── Collision ───────────────────────────────────────────────────

/// Cabinets may touch or overlap by up to this much without colliding.
pub const FLUSH_TOLERANCE_PX: f64 = 5.0;

/// Minimum vertical gap, in inches, that exempts two cabinets from collision.
pub const VERTICAL_CLEARANCE_IN: f64 = 3.0;

/// Height assumed for an element whose catalog entry gives none.
pub const DEFAULT_ELEMENT_HEIGHT_IN: f64 = 34.5;

/// Thickness given to the derived room-boundary walls.
pub const BOUNDARY_WALL_THICKNESS_PX: f64 = 0.0;

/// First wall number handed out to custom walls (1-4 are the room boundary).
pub const FIRST_CUSTOM_WALL_NUMBER: u32 = 5;

// ── Zoom / gestures ─────────────────────────────────────────────

/// Minimum zoom factor.
pub const MIN_ZOOM: f64 = 0.5;

/// Maximum zoom factor.
pub const MAX_ZOOM: f64 = 3.0;

/// Zoom change per zoom-in / zoom-out button press.
pub const ZOOM_STEP: f64 = 0.2;

/// Zoom level a double-tap toggles to from 1.0.
pub const DOUBLE_TAP_ZOOM: f64 = 2.0;

/// Maximum time between two taps for them to count as a double-tap.
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;

/// Press duration after which the UI timer reports a long-press.
pub const LONG_PRESS_MS: f64 = 500.0;

/// Screen-space movement a press may make and still count as a tap.
pub const TAP_SLOP_PX: f64 = 6.0;
