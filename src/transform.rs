//! Screen-to-design-space conversion and pointer normalization.
//!
//! The designer canvas is an SVG element whose `getScreenCTM()` matrix maps
//! design-space user units to client pixels. [`to_design_space`] runs client
//! coordinates back through the inverse of that matrix. [`PointerInput`] is
//! the browser-agnostic shape of a mouse or touch event; the `web` module
//! copies coordinates into it synchronously while the DOM event is live.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in either client (screen) or design space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// 2D affine matrix in SVG order.
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for ScreenMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl ScreenMatrix {
    #[must_use]
    pub fn identity() -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 }
    }

    /// Uniform zoom followed by a client-pixel offset, the shape the designer
    /// canvas produces (no skew or rotation).
    #[must_use]
    pub fn scale_translate(zoom: f64, offset_x: f64, offset_y: f64) -> Self {
        Self { a: zoom, b: 0.0, c: 0.0, d: zoom, e: offset_x, f: offset_y }
    }

    /// Apply the matrix to a point.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    /// The inverse matrix, or `None` when the matrix is singular or non-finite.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Self {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }
}

/// Convert client coordinates to design space through the inverse of `ctm`.
///
/// Returns the origin when the SVG root has not produced a matrix yet or the
/// matrix cannot be inverted.
#[must_use]
pub fn to_design_space(ctm: Option<&ScreenMatrix>, client_x: f64, client_y: f64) -> Point {
    match ctm.and_then(ScreenMatrix::inverse) {
        Some(inv) => inv.apply(Point::new(client_x, client_y)),
        None => Point::default(),
    }
}

/// A pointer event reduced to the coordinates the engine needs.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// Mouse down/move/up.
    Mouse(Point),
    /// `touchstart`: every finger currently on the surface.
    TouchStart { touches: Vec<Point> },
    /// `touchmove`: every finger currently on the surface.
    TouchMove { touches: Vec<Point> },
    /// `touchend`: `touches` is empty for the last finger, so the lifted
    /// fingers come from `changedTouches`. `remaining` counts fingers still down.
    TouchEnd { remaining: usize, changed_touches: Vec<Point> },
}

impl PointerInput {
    /// Number of fingers still down (mouse counts as one).
    #[must_use]
    pub fn active_count(&self) -> usize {
        match self {
            Self::Mouse(_) => 1,
            Self::TouchStart { touches } | Self::TouchMove { touches } => touches.len(),
            Self::TouchEnd { remaining, .. } => *remaining,
        }
    }
}

/// Client coordinates of the primary pointer, or `None` for an empty touch list.
#[must_use]
pub fn extract_pointer(input: &PointerInput) -> Option<Point> {
    match input {
        PointerInput::Mouse(p) => Some(*p),
        PointerInput::TouchStart { touches } | PointerInput::TouchMove { touches } => touches.first().copied(),
        PointerInput::TouchEnd { changed_touches, .. } => changed_touches.first().copied(),
    }
}
