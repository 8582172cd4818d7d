//! Geometry primitives: rectangles, segments, and rotated-rectangle bounds.
//!
//! Pure functions with no engine state. Everything here works in design
//! space and tolerates degenerate input by answering "no intersection"
//! rather than failing.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

use crate::consts::PARALLEL_EPSILON;
use crate::transform::Point;

/// Axis-aligned rectangle, `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Top, right, bottom, and left edges, clockwise from the top-left corner.
    #[must_use]
    pub fn edges(&self) -> [Segment; 4] {
        let tl = Point::new(self.x, self.y);
        let tr = Point::new(self.right(), self.y);
        let br = Point::new(self.right(), self.bottom());
        let bl = Point::new(self.x, self.bottom());
        [Segment::new(tl, tr), Segment::new(tr, br), Segment::new(br, bl), Segment::new(bl, tl)]
    }

    /// Inclusive point containment.
    #[must_use]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Whether `other` lies entirely inside `self` (edges may coincide).
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x && other.y >= self.y && other.right() <= self.right() && other.bottom() <= self.bottom()
    }

    /// Strict interior overlap after shrinking the test by `tolerance` on
    /// every side. A positive tolerance lets rectangles touch or overlap
    /// slightly without counting; zero means shared edges do not overlap.
    #[must_use]
    pub fn overlaps_with_tolerance(&self, other: &Rect, tolerance: f64) -> bool {
        self.x < other.right() - tolerance
            && self.right() > other.x + tolerance
            && self.y < other.bottom() - tolerance
            && self.bottom() > other.y + tolerance
    }

    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_with_tolerance(other, 0.0)
    }

    /// The same rectangle moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    #[must_use]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        distance(self.a, self.b)
    }

    #[must_use]
    pub fn midpoint(&self) -> Point {
        Point::new((self.a.x + self.b.x) / 2.0, (self.a.y + self.b.y) / 2.0)
    }

    /// Direction of `a → b` in degrees, measured clockwise from +x (y down).
    #[must_use]
    pub fn angle_deg(&self) -> f64 {
        (self.b.y - self.a.y).atan2(self.b.x - self.a.x).to_degrees()
    }

    /// Closest point on the segment to `p` and its clamped parameter `t ∈ [0, 1]`.
    ///
    /// A zero-length segment projects everything onto `a` with `t = 0`.
    #[must_use]
    pub fn project(&self, p: Point) -> (Point, f64) {
        let d = self.b - self.a;
        let len_sq = d.x * d.x + d.y * d.y;
        if len_sq == 0.0 {
            return (self.a, 0.0);
        }
        let t = (((p.x - self.a.x) * d.x + (p.y - self.a.y) * d.y) / len_sq).clamp(0.0, 1.0);
        (Point::new(self.a.x + t * d.x, self.a.y + t * d.y), t)
    }

    /// Parametric segment/segment intersection. Endpoint contact counts;
    /// near-parallel pairs never intersect.
    #[must_use]
    pub fn intersects(&self, other: &Segment) -> bool {
        let d1 = self.b - self.a;
        let d2 = other.b - other.a;
        let denom = cross(d1, d2);
        if denom.abs() < PARALLEL_EPSILON {
            return false;
        }
        let diff = other.a - self.a;
        let t = cross(diff, d2) / denom;
        let u = cross(diff, d1) / denom;
        (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
    }
}

fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Euclidean distance.
#[must_use]
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}

/// Whether `segment` crosses any of the four edges of `rect`.
///
/// A segment lying entirely inside the rectangle touches no edge and is not
/// reported.
#[must_use]
pub fn segment_intersects_rect(segment: &Segment, rect: &Rect) -> bool {
    rect.edges().iter().any(|edge| segment.intersects(edge))
}

/// Corners of a `width × height` rectangle rotated about `center`, starting
/// at the pre-rotation top-left and going clockwise.
#[must_use]
pub fn rotated_rect_corners(center: Point, width: f64, height: f64, rotation_deg: f64) -> [Point; 4] {
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    let hw = width / 2.0;
    let hh = height / 2.0;
    [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(lx, ly)| {
        Point::new(center.x + lx * cos - ly * sin, center.y + lx * sin + ly * cos)
    })
}

/// Axis-aligned bounds of the rotated rectangle.
///
/// Over-approximates the true footprint for non-quarter rotations; callers
/// use it where a false "blocked" is acceptable and a false "clear" is not.
#[must_use]
pub fn rotated_rect_aabb(center: Point, width: f64, height: f64, rotation_deg: f64) -> Rect {
    let corners = rotated_rect_corners(center, width, height, rotation_deg);
    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for c in corners {
        min.x = min.x.min(c.x);
        min.y = min.y.min(c.y);
        max.x = max.x.max(c.x);
        max.y = max.y.max(c.y);
    }
    Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
}
