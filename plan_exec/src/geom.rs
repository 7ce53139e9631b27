//! # Geometry primitives
//!
//! Points are in field display units. All functions here are pure.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::Point2;

// ------------------------------------------------------------------------------------------------
// TYPES
// ------------------------------------------------------------------------------------------------

/// A point on the field in display units.
pub type Point = Point2<f64>;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of steps used when sampling a quadratic Bezier curve, giving `BEZIER_SAMPLE_STEPS + 1`
/// points at `t = 0, 0.01, ..., 1.0`.
pub const BEZIER_SAMPLE_STEPS: usize = 100;

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Euclidean distance between two points.
pub fn distance(p1: &Point, p2: &Point) -> f64 {
    nalgebra::distance(p1, p2)
}

/// Heading from `p1` to `p2` in degrees, measured from the +ve x axis, in the range (-180, 180].
///
/// Coincident points give `atan2(0, 0) = 0`.
pub fn heading_deg(p1: &Point, p2: &Point) -> f64 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;

    dy.atan2(dx).to_degrees()
}

/// Evaluate the quadratic Bezier curve from `p1` to `p2` with control point `control` at `t`.
pub fn quad_bezier_point(p1: &Point, p2: &Point, control: &Point, t: f64) -> Point {
    let u = 1.0 - t;
    let a = u * u;
    let b = 2.0 * u * t;
    let c = t * t;

    Point::new(
        a * p1.x + b * control.x + c * p2.x,
        a * p1.y + b * control.y + c * p2.y,
    )
}

/// Sample the curve at `n + 1` evenly spaced values of `t` (not evenly spaced along the arc).
pub fn quad_bezier_sample(p1: &Point, p2: &Point, control: &Point, n: usize) -> Vec<Point> {
    // Guard against n == 0 producing a NaN t value
    let n = n.max(1);

    (0..=n)
        .map(|i| quad_bezier_point(p1, p2, control, i as f64 / n as f64))
        .collect()
}
