//! # Motion densifier
//!
//! Converts each path segment into a dense series of motion steps which the robot drives through
//! in order. Every step of a segment shares the straight-line heading between the segment's
//! endpoints, and its speed ramps up with its distance from the segment's start waypoint.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;
use thiserror::Error;

use crate::{
    geom::{self, Point},
    path::{Segment, SegmentKind},
};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Parameters of the motion profile.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionProfile {
    /// Target spacing between consecutive motion steps.
    ///
    /// Units: display units
    pub step_threshold: f64,

    /// Speed demand at the start of a segment.
    pub base_speed: f64,

    /// Upper limit of the speed demand.
    pub max_speed: f64,

    /// Distance from the segment start over which the speed ramps from `base_speed` to
    /// `max_speed`.
    ///
    /// Units: display units
    pub ramp_distance: f64,
}

/// A single densified motion step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    pub point: Point,
    pub heading_deg: f64,
    pub speed: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProfileError {
    #[error("Motion profile {0} must be a positive number, found {1}")]
    InvalidDistance(&'static str, f64),

    #[error("Motion profile speeds must be finite with base <= max, found base {0} and max {1}")]
    InvalidSpeeds(f64, f64),
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            step_threshold: 3.0,
            base_speed: 40.0,
            max_speed: 100.0,
            ramp_distance: 100.0,
        }
    }
}

impl MotionProfile {
    /// Check the profile can be used for densification.
    ///
    /// A zero threshold would ask for infinitely many steps and a zero ramp makes every speed NaN.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let dists = [
            ("step_threshold", self.step_threshold),
            ("ramp_distance", self.ramp_distance),
        ];

        for &(name, value) in dists.iter() {
            if !value.is_finite() || value <= 0.0 {
                return Err(ProfileError::InvalidDistance(name, value));
            }
        }

        if !self.base_speed.is_finite()
            || !self.max_speed.is_finite()
            || self.base_speed > self.max_speed
        {
            return Err(ProfileError::InvalidSpeeds(self.base_speed, self.max_speed));
        }

        Ok(())
    }

    /// Speed demand for a step `dist` away from the start of its segment.
    pub fn speed_at(&self, dist: f64) -> f64 {
        let speed =
            self.base_speed + (dist / self.ramp_distance) * (self.max_speed - self.base_speed);

        speed.min(self.max_speed)
    }

    /// Densify a whole segment into motion steps.
    ///
    /// A curved segment without a committed control point is treated as straight.
    pub fn densify(&self, seg: &Segment) -> Vec<MotionStep> {
        let p1 = seg.start.point;
        let p2 = seg.end.point;
        let heading_deg = geom::heading_deg(&p1, &p2);

        let points = match (seg.kind, seg.control) {
            (SegmentKind::Curved, Some(control)) => self.densify_curve(&p1, &p2, &control),
            _ => self.densify_straight(&p1, &p2),
        };

        points
            .into_iter()
            .map(|point| MotionStep {
                point,
                heading_deg,
                speed: self.speed_at(geom::distance(&p1, &point)),
            })
            .collect()
    }

    /// Evenly spaced points along a straight line, excluding `p1` and ending exactly on `p2`.
    pub fn densify_straight(&self, p1: &Point, p2: &Point) -> Vec<Point> {
        let num_points = ((geom::distance(p1, p2) / self.step_threshold).floor() as usize).max(1);
        let delta = p2 - p1;

        let mut points: Vec<Point> = (1..num_points)
            .map(|i| {
                let t = i as f64 / num_points as f64;
                p1 + t * delta
            })
            .collect();

        // t = 1 is p2 itself, pushing it directly avoids p1 + (p2 - p1) rounding away from it
        points.push(*p2);

        points
    }

    /// Points along a quadratic Bezier curve, excluding `p1`.
    ///
    /// The curve is sampled at fixed steps of `t` and a sample is kept only once it is at least
    /// `step_threshold` from the last kept point. Fixed `t` steps aren't uniform in arc length so
    /// tightly curved regions keep denser points.
    pub fn densify_curve(&self, p1: &Point, p2: &Point, control: &Point) -> Vec<Point> {
        let samples = geom::quad_bezier_sample(p1, p2, control, geom::BEZIER_SAMPLE_STEPS);

        let mut points = Vec::new();
        let mut last_kept = *p1;

        for sample in samples.into_iter().skip(1) {
            if geom::distance(&last_kept, &sample) >= self.step_threshold {
                points.push(sample);
                last_kept = sample;
            }
        }

        points
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
