//! Gesture state machine: pointer and touch streams in, intents out.
//!
//! The controller knows nothing about rooms or elements beyond the id the
//! host says was under the pointer. It tracks one gesture at a time in
//! [`GestureState`] and reports what the user meant as a list of
//! [`Intent`]s. All points are client (screen) pixels so pinch distances
//! and tap slop do not change as the zoom changes underneath them.
//!
//! Pinch preempts drag, and any zoom change cancels a drag in flight.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use tracing::debug;

use crate::config::GestureConfig;
use crate::geom::distance;
use crate::model::ElementId;
use crate::transform::Point;

/// The gesture currently being tracked.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    /// Nothing pressed.
    #[default]
    Idle,
    /// One pointer is down. Until it moves past the tap slop this is also a
    /// tap or long-press candidate.
    Dragging {
        /// Element under the pointer at press time; `None` for empty floor.
        target: Option<ElementId>,
        /// Client position of the press.
        origin: Point,
        /// Client position of the latest move.
        last: Point,
        /// Host timestamp of the press, for long-press detection.
        pressed_ms: f64,
        /// Whether the pointer has left the tap slop.
        moved: bool,
    },
    /// Two or more fingers are down.
    Pinching {
        /// Finger distance when the pinch began.
        initial_distance: f64,
        /// Zoom when the pinch began.
        initial_zoom: f64,
    },
    /// The press was held long enough to open the context action. Ends on release.
    LongPressing { target: Option<ElementId>, at: Point },
    /// A wall's rotate handle is being dragged around `pivot`.
    RotatingWall {
        wall_number: u32,
        pivot: Point,
        /// Pointer bearing from the pivot at gesture start, degrees.
        start_angle: f64,
        /// Rotation relative to gesture start, degrees in `(-180, 180]`.
        degrees: f64,
    },
}

/// What the user meant, emitted by the controller's handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Element dragged; `at` is the current client position.
    Drag { target: ElementId, at: Point },
    /// Drag released at `at`.
    DragEnd { target: ElementId, at: Point },
    /// Drag abandoned; the element goes back where it started.
    DragCancelled { target: ElementId },
    Tap { target: Option<ElementId>, at: Point },
    DoubleTap { at: Point },
    /// New zoom factor, already clamped.
    Zoom { zoom: f64 },
    LongPress { target: Option<ElementId>, at: Point },
    /// Live wall rotation relative to gesture start.
    RotateWall { wall_number: u32, degrees: f64 },
    /// Wall rotation released.
    RotateWallEnd { wall_number: u32, degrees: f64 },
}

/// Scale after a pinch: `initial_scale × current / initial`, clamped to
/// `[min, max]`.
///
/// A zero or non-finite start distance leaves the scale where it began, and
/// a NaN result falls back to `min`.
#[must_use]
pub fn pinch_scale(initial_distance: f64, current_distance: f64, initial_scale: f64, min: f64, max: f64) -> f64 {
    let ratio = if initial_distance > 0.0 && initial_distance.is_finite() && current_distance.is_finite() {
        current_distance / initial_distance
    } else {
        1.0
    };
    let scale = initial_scale * ratio;
    if scale.is_nan() {
        return min;
    }
    scale.max(min).min(max)
}

/// Interprets pointer and touch events into [`Intent`]s.
#[derive(Debug, Clone)]
pub struct GestureController {
    config: GestureConfig,
    state: GestureState,
    zoom: f64,
    last_tap_ms: Option<f64>,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureController {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self { config, state: GestureState::Idle, zoom: config.clamp_zoom(1.0), last_tap_ms: None }
    }

    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    // --- Pointer ---

    /// Press. Starts a drag (or tap/long-press candidate) unless a pinch is active.
    pub fn on_pointer_down(&mut self, at: Point, time_ms: f64, target: Option<ElementId>) -> Vec<Intent> {
        if matches!(self.state, GestureState::Pinching { .. }) {
            return Vec::new();
        }
        let intents = self.cancel();
        self.state = GestureState::Dragging { target, origin: at, last: at, pressed_ms: time_ms, moved: false };
        intents
    }

    pub fn on_pointer_move(&mut self, at: Point) -> Vec<Intent> {
        let slop = self.config.tap_slop_px;
        match &mut self.state {
            GestureState::Dragging { target, origin, last, moved, .. } => {
                if !*moved && distance(*origin, at) > slop {
                    *moved = true;
                    debug!(element = ?target, "drag started");
                }
                *last = at;
                match target {
                    Some(id) if *moved => vec![Intent::Drag { target: *id, at }],
                    _ => Vec::new(),
                }
            }
            GestureState::RotatingWall { wall_number, pivot, start_angle, degrees } => {
                *degrees = relative_angle(*start_angle, bearing(*pivot, at));
                vec![Intent::RotateWall { wall_number: *wall_number, degrees: *degrees }]
            }
            GestureState::Idle | GestureState::Pinching { .. } | GestureState::LongPressing { .. } => Vec::new(),
        }
    }

    /// Release. Ends a drag, or reports a tap (and a double-tap when it
    /// follows another tap within the window).
    pub fn on_pointer_up(&mut self, at: Point, time_ms: f64) -> Vec<Intent> {
        match std::mem::take(&mut self.state) {
            GestureState::Dragging { target, moved: true, .. } => {
                target.map(|id| vec![Intent::DragEnd { target: id, at }]).unwrap_or_default()
            }
            GestureState::Dragging { target, moved: false, .. } => self.tap(target, at, time_ms),
            GestureState::RotatingWall { wall_number, degrees, .. } => {
                debug!(wall_number, degrees, "wall rotate finished");
                vec![Intent::RotateWallEnd { wall_number, degrees }]
            }
            GestureState::Idle | GestureState::Pinching { .. } | GestureState::LongPressing { .. } => Vec::new(),
        }
    }

    fn tap(&mut self, target: Option<ElementId>, at: Point, time_ms: f64) -> Vec<Intent> {
        let mut intents = vec![Intent::Tap { target, at }];
        let double = self.last_tap_ms.is_some_and(|prev| {
            let dt = time_ms - prev;
            dt > 0.0 && dt <= self.config.double_tap_window_ms
        });
        if double {
            self.last_tap_ms = None;
            let next = if (self.zoom - 1.0).abs() < f64::EPSILON { self.config.double_tap_zoom } else { 1.0 };
            intents.push(Intent::DoubleTap { at });
            intents.extend(self.set_zoom(next));
        } else {
            self.last_tap_ms = Some(time_ms);
        }
        intents
    }

    // --- Touch ---

    /// `touchstart` with every finger now down. Two or more fingers start a
    /// pinch and cancel any drag.
    pub fn on_touch_start(&mut self, touches: &[Point], time_ms: f64, target: Option<ElementId>) -> Vec<Intent> {
        match touches {
            [] => Vec::new(),
            [only] => {
                if matches!(self.state, GestureState::Idle) {
                    self.on_pointer_down(*only, time_ms, target)
                } else {
                    Vec::new()
                }
            }
            [a, b, ..] => {
                let intents = self.cancel();
                let initial_distance = distance(*a, *b);
                debug!(initial_distance, zoom = self.zoom, "pinch started");
                self.state = GestureState::Pinching { initial_distance, initial_zoom: self.zoom };
                intents
            }
        }
    }

    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Intent> {
        if let GestureState::Pinching { initial_distance, initial_zoom } = self.state {
            let [a, b, ..] = touches else {
                return Vec::new();
            };
            let zoom =
                pinch_scale(initial_distance, distance(*a, *b), initial_zoom, self.config.min_zoom, self.config.max_zoom);
            if (zoom - self.zoom).abs() < f64::EPSILON {
                return Vec::new();
            }
            self.zoom = zoom;
            return vec![Intent::Zoom { zoom }];
        }
        match touches.first() {
            Some(first) => self.on_pointer_move(*first),
            None => Vec::new(),
        }
    }

    /// `touchend`. A pinch ends once fewer than two fingers remain; a single
    /// finger lifting behaves like a pointer release.
    pub fn on_touch_end(&mut self, remaining: usize, changed: &[Point], time_ms: f64) -> Vec<Intent> {
        if matches!(self.state, GestureState::Pinching { .. }) {
            if remaining < 2 {
                debug!(zoom = self.zoom, "pinch finished");
                self.state = GestureState::Idle;
            }
            return Vec::new();
        }
        match changed.first() {
            Some(at) if remaining == 0 => self.on_pointer_up(*at, time_ms),
            _ => Vec::new(),
        }
    }

    // --- Timers / buttons ---

    /// Called by the host's long-press timer. Fires only if the press is
    /// still down, has not moved past the slop, and has been held long enough.
    pub fn on_long_press_timer(&mut self, now_ms: f64) -> Vec<Intent> {
        let GestureState::Dragging { target, last, pressed_ms, moved: false, .. } = self.state else {
            return Vec::new();
        };
        if now_ms - pressed_ms < self.config.long_press_ms {
            return Vec::new();
        }
        debug!(element = ?target, "long press");
        let mut intents: Vec<Intent> = target.map(|id| Intent::DragCancelled { target: id }).into_iter().collect();
        intents.push(Intent::LongPress { target, at: last });
        self.state = GestureState::LongPressing { target, at: last };
        intents
    }

    pub fn zoom_in(&mut self) -> Vec<Intent> {
        self.set_zoom(self.zoom + self.config.zoom_step)
    }

    pub fn zoom_out(&mut self) -> Vec<Intent> {
        self.set_zoom(self.zoom - self.config.zoom_step)
    }

    /// Jump to `zoom` (clamped). Cancels a drag in flight; emits
    /// [`Intent::Zoom`] only if the zoom actually changed.
    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Intent> {
        let mut intents = self.cancel_drag();
        let zoom = self.config.clamp_zoom(zoom);
        if (zoom - self.zoom).abs() >= f64::EPSILON {
            debug!(from = self.zoom, to = zoom, "zoom changed");
            self.zoom = zoom;
            intents.push(Intent::Zoom { zoom });
        }
        intents
    }

    /// Start rotating a custom wall about `pivot` from the current `pointer`.
    pub fn begin_wall_rotate(&mut self, wall_number: u32, pivot: Point, pointer: Point) -> Vec<Intent> {
        let intents = self.cancel();
        self.state = GestureState::RotatingWall { wall_number, pivot, start_angle: bearing(pivot, pointer), degrees: 0.0 };
        intents
    }

    /// Abandon whatever gesture is active (`pointercancel`, Escape).
    pub fn cancel(&mut self) -> Vec<Intent> {
        let intents = self.cancel_drag();
        self.state = GestureState::Idle;
        intents
    }

    fn cancel_drag(&mut self) -> Vec<Intent> {
        if !matches!(self.state, GestureState::Dragging { .. }) {
            return Vec::new();
        }
        let GestureState::Dragging { target, .. } = std::mem::take(&mut self.state) else {
            return Vec::new();
        };
        target.map(|id| vec![Intent::DragCancelled { target: id }]).unwrap_or_default()
    }
}

/// Bearing of `to` seen from `from`, degrees clockwise from +x (y down).
fn bearing(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

/// `current - start` wrapped into `(-180, 180]`.
fn relative_angle(start: f64, current: f64) -> f64 {
    let d = (current - start).rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}
