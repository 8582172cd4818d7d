//! Browser edge: DOM events and the SVG screen matrix in, engine calls out.
//!
//! Touch coordinate objects do not outlive the event handler, so every
//! event is copied into a [`PointerInput`] before anything else runs.

use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, SvgGraphicsElement, SvgMatrix, TouchEvent, TouchList};

use crate::config::LayoutConfig;
use crate::engine::{Action, EngineCore};
use crate::model::Element;
use crate::snap::RoomScene;
use crate::transform::{Point, PointerInput, ScreenMatrix, extract_pointer};

/// The full engine. Wraps `EngineCore` and owns the designer's SVG root.
pub struct Engine {
    svg: SvgGraphicsElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given SVG element.
    #[must_use]
    pub fn new(svg: SvgGraphicsElement, config: LayoutConfig) -> Self {
        Self { svg, core: EngineCore::new(config) }
    }

    /// Re-read `getScreenCTM()`. Called before every event since scroll,
    /// resize, and zoom all move the SVG under the pointer.
    pub fn refresh_screen_ctm(&mut self) {
        let ctm = self.svg.get_screen_ctm().map(|m| matrix_from_svg(&m));
        self.core.set_screen_ctm(ctm);
    }

    /// Dispatch a mouse or touch event by its DOM type.
    ///
    /// `target` is the element the host hit-tested under the pointer; it is
    /// only consulted on press.
    pub fn on_event(&mut self, event: &Event, target: Option<&Element>, scene: &RoomScene<'_>) -> Vec<Action> {
        let kind = event.type_();
        if kind == "touchcancel" || kind == "pointercancel" {
            return self.core.cancel();
        }
        let Some(input) = pointer_input(event) else {
            return Vec::new();
        };
        self.refresh_screen_ctm();
        let now = js_sys::Date::now();
        match (kind.as_str(), input) {
            ("mousedown", PointerInput::Mouse(p)) => self.core.on_pointer_down(p, now, target),
            ("mousemove", PointerInput::Mouse(p)) => self.core.on_pointer_move(p, scene),
            ("mouseup", PointerInput::Mouse(p)) => self.core.on_pointer_up(p, now, scene),
            (_, PointerInput::TouchStart { touches }) => self.core.on_touch_start(&touches, now, target),
            (_, PointerInput::TouchMove { touches }) => self.core.on_touch_move(&touches, scene),
            (_, PointerInput::TouchEnd { remaining, changed_touches }) => {
                self.core.on_touch_end(remaining, &changed_touches, now, scene)
            }
            _ => Vec::new(),
        }
    }

    /// Called from the host's long-press `setTimeout`.
    pub fn on_long_press_timer(&mut self) -> Vec<Action> {
        self.core.on_long_press_timer(js_sys::Date::now())
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.core.zoom_in()
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.core.zoom_out()
    }

    /// Snap a wall-drawing point taken from a mouse or touch event.
    pub fn snap_wall_point(&mut self, event: &Event, scene: &RoomScene<'_>, editing: Option<u32>) -> Option<Action> {
        let client = pointer_input(event).as_ref().and_then(extract_pointer)?;
        self.refresh_screen_ctm();
        Some(self.core.snap_wall_point(client, scene, editing))
    }
}

/// Copy a DOM mouse or touch event into a [`PointerInput`].
///
/// `touchend` reads the lifted fingers from `changedTouches`, since
/// `touches` no longer holds them.
#[must_use]
pub fn pointer_input(event: &Event) -> Option<PointerInput> {
    if let Some(touch) = event.dyn_ref::<TouchEvent>() {
        return match event.type_().as_str() {
            "touchstart" => Some(PointerInput::TouchStart { touches: touch_points(&touch.touches()) }),
            "touchmove" => Some(PointerInput::TouchMove { touches: touch_points(&touch.touches()) }),
            "touchend" => Some(PointerInput::TouchEnd {
                remaining: usize::try_from(touch.touches().length()).unwrap_or_default(),
                changed_touches: touch_points(&touch.changed_touches()),
            }),
            _ => None,
        };
    }
    event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| PointerInput::Mouse(Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()))))
}

fn touch_points(list: &TouchList) -> Vec<Point> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
        .collect()
}

fn matrix_from_svg(m: &SvgMatrix) -> ScreenMatrix {
    ScreenMatrix {
        a: f64::from(m.a()),
        b: f64::from(m.b()),
        c: f64::from(m.c()),
        d: f64::from(m.d()),
        e: f64::from(m.e()),
        f: f64::from(m.f()),
    }
}
