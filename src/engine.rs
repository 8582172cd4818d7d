//! Input engine: gestures in, resolved positions out.
//!
//! `EngineCore` glues the [`GestureController`] to coordinate conversion and
//! snap resolution. It holds only transient gesture state (the latest screen
//! matrix and the grab offset of the element being dragged). Room state is
//! borrowed per call through [`RoomScene`], so the host's element and wall
//! lists stay the single source of truth.
//!
//! During a drag the engine emits [`Action::PreviewPosition`] on every move
//! for the render layer to apply directly, and one [`Action::CommitPosition`]
//! on release for the host to write back to its state.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::gesture::{GestureController, GestureState, Intent};
use crate::model::{Element, ElementId};
use crate::snap::{PointSnap, RoomScene, SnapOutcome, resolve_move, resolve_wall_point};
use crate::transform::{Point, ScreenMatrix, to_design_space};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Position to show while dragging. Not yet authoritative.
    PreviewPosition { id: ElementId, outcome: SnapOutcome },
    /// Final position on release.
    CommitPosition { id: ElementId, outcome: SnapOutcome },
    /// Drag abandoned; restore the element's original position.
    DragCancelled { id: ElementId },
    ZoomChanged { zoom: f64 },
    /// `committed` is false while the handle is still held.
    RotateWall { wall_number: u32, degrees: f64, committed: bool },
    /// Long-press at a design-space point.
    LongPress { target: Option<ElementId>, at: Point },
    Tap { target: Option<ElementId>, at: Point },
    WallPointSnapped { point: Point, snapped: bool, wall_number: Option<u32> },
}

/// The element being dragged and where on it the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub id: ElementId,
    /// Pointer position minus element origin, in design space.
    pub grab: Point,
}

/// Core engine state; everything that does not need the SVG element.
///
/// Separated from `web::Engine` so it can be tested without a browser.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub config: LayoutConfig,
    pub gesture: GestureController,
    ctm: Option<ScreenMatrix>,
    drag: Option<DragSession>,
}

impl EngineCore {
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self { config, gesture: GestureController::new(config.gesture), ctm: None, drag: None }
    }

    // --- Coordinates ---

    /// Record the SVG's current screen matrix. `None` until the SVG has rendered.
    pub fn set_screen_ctm(&mut self, ctm: Option<ScreenMatrix>) {
        self.ctm = ctm;
    }

    #[must_use]
    pub fn to_design(&self, client: Point) -> Point {
        to_design_space(self.ctm.as_ref(), client.x, client.y)
    }

    // --- Queries ---

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.gesture.zoom()
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<DragSession> {
        self.drag
    }

    // --- Pointer ---

    /// Press at `client`. `target` is the element the host hit-tested under
    /// the pointer, if any.
    pub fn on_pointer_down(&mut self, client: Point, time_ms: f64, target: Option<&Element>) -> Vec<Action> {
        let intents = self.gesture.on_pointer_down(client, time_ms, target.map(|e| e.id));
        let actions = self.apply(intents, None);
        self.begin_drag(client, target);
        actions
    }

    pub fn on_pointer_move(&mut self, client: Point, scene: &RoomScene<'_>) -> Vec<Action> {
        let intents = self.gesture.on_pointer_move(client);
        self.apply(intents, Some(scene))
    }

    pub fn on_pointer_up(&mut self, client: Point, time_ms: f64, scene: &RoomScene<'_>) -> Vec<Action> {
        let intents = self.gesture.on_pointer_up(client, time_ms);
        let actions = self.apply(intents, Some(scene));
        self.drag = None;
        actions
    }

    /// `pointercancel` or Escape.
    pub fn cancel(&mut self) -> Vec<Action> {
        let intents = self.gesture.cancel();
        let actions = self.apply(intents, None);
        self.drag = None;
        actions
    }

    // --- Touch ---

    pub fn on_touch_start(&mut self, touches: &[Point], time_ms: f64, target: Option<&Element>) -> Vec<Action> {
        // A lone touch only starts a press from Idle; otherwise the current
        // gesture keeps its session.
        let was_idle = matches!(self.gesture.state(), GestureState::Idle);
        let intents = self.gesture.on_touch_start(touches, time_ms, target.map(|e| e.id));
        let actions = self.apply(intents, None);
        if let ([only], true) = (touches, was_idle) {
            self.begin_drag(*only, target);
        }
        actions
    }

    pub fn on_touch_move(&mut self, touches: &[Point], scene: &RoomScene<'_>) -> Vec<Action> {
        let intents = self.gesture.on_touch_move(touches);
        self.apply(intents, Some(scene))
    }

    pub fn on_touch_end(
        &mut self,
        remaining: usize,
        changed: &[Point],
        time_ms: f64,
        scene: &RoomScene<'_>,
    ) -> Vec<Action> {
        let intents = self.gesture.on_touch_end(remaining, changed, time_ms);
        let actions = self.apply(intents, Some(scene));
        if remaining == 0 {
            self.drag = None;
        }
        actions
    }

    // --- Timers / buttons ---

    pub fn on_long_press_timer(&mut self, now_ms: f64) -> Vec<Action> {
        let intents = self.gesture.on_long_press_timer(now_ms);
        self.apply(intents, None)
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        let intents = self.gesture.zoom_in();
        self.apply(intents, None)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        let intents = self.gesture.zoom_out();
        self.apply(intents, None)
    }

    /// Start dragging a wall's rotate handle. `pivot` is the wall midpoint in
    /// design space; it is mapped to client space so the whole gesture runs
    /// in one coordinate system.
    pub fn begin_wall_rotate(&mut self, wall_number: u32, pivot: Point, client: Point) -> Vec<Action> {
        let pivot_client = self.ctm.map_or(pivot, |m| m.apply(pivot));
        let intents = self.gesture.begin_wall_rotate(wall_number, pivot_client, client);
        self.apply(intents, None)
    }

    // --- Direct resolution ---

    /// Snap a point of a wall being drawn or edited. `editing` skips that
    /// wall's own endpoints.
    #[must_use]
    pub fn snap_wall_point(&self, client: Point, scene: &RoomScene<'_>, editing: Option<u32>) -> Action {
        let PointSnap { point, snapped, wall_number } =
            resolve_wall_point(self.to_design(client), scene.walls, editing, &self.config.snap);
        Action::WallPointSnapped { point, snapped, wall_number }
    }

    /// Resolve where a new element dropped from the palette lands, centered
    /// on the pointer.
    #[must_use]
    pub fn resolve_drop(&self, element: &Element, client: Point, scene: &RoomScene<'_>) -> SnapOutcome {
        let at = self.to_design(client);
        let (w, d) = element.oriented_size();
        resolve_move(element, at.x - w / 2.0, at.y - d / 2.0, scene, &self.config)
    }

    // --- Internals ---

    fn begin_drag(&mut self, client: Point, target: Option<&Element>) {
        if !matches!(self.gesture.state(), GestureState::Dragging { .. }) {
            return;
        }
        self.drag = target.map(|element| {
            let at = self.to_design(client);
            DragSession { id: element.id, grab: Point::new(at.x - element.x, at.y - element.y) }
        });
    }

    fn apply(&mut self, intents: Vec<Intent>, scene: Option<&RoomScene<'_>>) -> Vec<Action> {
        let mut actions = Vec::with_capacity(intents.len());
        for intent in intents {
            match intent {
                Intent::Drag { target, at } => {
                    if let Some(outcome) = scene.and_then(|s| self.resolve_drag(target, at, s)) {
                        actions.push(Action::PreviewPosition { id: target, outcome });
                    }
                }
                Intent::DragEnd { target, at } => {
                    if let Some(outcome) = scene.and_then(|s| self.resolve_drag(target, at, s)) {
                        debug!(id = %target, x = outcome.x, y = outcome.y, "drag committed");
                        actions.push(Action::CommitPosition { id: target, outcome });
                    }
                    self.drag = None;
                }
                Intent::DragCancelled { target } => {
                    self.drag = None;
                    actions.push(Action::DragCancelled { id: target });
                }
                Intent::Tap { target, at } => actions.push(Action::Tap { target, at: self.to_design(at) }),
                Intent::DoubleTap { .. } => {}
                Intent::Zoom { zoom } => actions.push(Action::ZoomChanged { zoom }),
                Intent::LongPress { target, at } => {
                    actions.push(Action::LongPress { target, at: self.to_design(at) });
                }
                Intent::RotateWall { wall_number, degrees } => {
                    actions.push(Action::RotateWall { wall_number, degrees, committed: false });
                }
                Intent::RotateWallEnd { wall_number, degrees } => {
                    actions.push(Action::RotateWall { wall_number, degrees, committed: true });
                }
            }
        }
        actions
    }

    /// Snap-resolved position of the dragged element for a pointer at `client`.
    fn resolve_drag(&self, id: ElementId, client: Point, scene: &RoomScene<'_>) -> Option<SnapOutcome> {
        let session = self.drag.filter(|s| s.id == id)?;
        let element = scene.elements.iter().find(|e| e.id == id)?;
        let at = self.to_design(client);
        Some(resolve_move(element, at.x - session.grab.x, at.y - session.grab.y, scene, &self.config))
    }
}
