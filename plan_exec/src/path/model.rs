//! Implementation of the path model
//!
//! Waypoints are only ever appended. The model owns at most one open curve gesture, which is
//! opened by [`PathModel::begin_curve`] and closed by [`PathModel::finalize_curve`].

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};

// Internal
use super::{PathError, Segment, SegmentKind, Waypoint};
use crate::{
    field::SideRestriction,
    geom::{self, Point},
};
use plan_if::edit::ActuatorCmd;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An ordered path of waypoints joined by straight or curved segments.
#[derive(Debug, Clone, Default)]
pub struct PathModel {
    waypoints: Vec<Waypoint>,

    /// `segments[i]` joins `waypoints[i]` and `waypoints[i + 1]`.
    segments: Vec<SegmentData>,

    restriction: SideRestriction,

    open_curve: Option<OpenCurve>,
}

#[derive(Debug, Clone, Copy)]
struct SegmentData {
    kind: SegmentKind,
    control: Option<Point>,
}

/// A curve gesture which has been started but not yet finalized.
#[derive(Debug, Clone, Copy)]
struct OpenCurve {
    /// Last control point seen by `update_curve_control`.
    preview_control: Option<Point>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PathModel {
    /// Create a new empty path with the given side restriction.
    pub fn new(restriction: SideRestriction) -> Self {
        Self {
            restriction,
            ..Default::default()
        }
    }

    /// Append the start point of the path.
    pub fn append_start(&mut self, point: Point) -> Result<(), PathError> {
        if !self.waypoints.is_empty() {
            return Err(PathError::AlreadyStarted);
        }
        self.check_point(&point)?;

        self.waypoints.push(Waypoint::new(point));

        debug!("Start point added at ({:.2}, {:.2})", point.x, point.y);

        Ok(())
    }

    /// Append a waypoint joined to the previous one by a straight segment.
    pub fn append_straight(&mut self, point: Point) -> Result<(), PathError> {
        self.check_can_append(&point)?;

        self.waypoints.push(Waypoint::new(point));
        self.segments.push(SegmentData {
            kind: SegmentKind::Straight,
            control: None,
        });

        debug!("Waypoint added (straight) at ({:.2}, {:.2})", point.x, point.y);

        Ok(())
    }

    /// Append a provisional waypoint and open a curved segment towards it.
    ///
    /// The segment has no control point until [`PathModel::finalize_curve`] is called.
    pub fn begin_curve(&mut self, point: Point) -> Result<(), PathError> {
        self.check_can_append(&point)?;

        self.waypoints.push(Waypoint::new(point));
        self.segments.push(SegmentData {
            kind: SegmentKind::Curved,
            control: None,
        });
        self.open_curve = Some(OpenCurve {
            preview_control: None,
        });

        debug!("Curve started towards ({:.2}, {:.2})", point.x, point.y);

        Ok(())
    }

    /// Move the control point of the open curve. Only the preview is affected.
    pub fn update_curve_control(&mut self, control: Point) -> Result<(), PathError> {
        let curve = self.open_curve.as_mut().ok_or(PathError::NoActiveCurve)?;
        check_finite(&control)?;
        curve.preview_control = Some(control);

        trace!("Curve control moved to ({:.2}, {:.2})", control.x, control.y);

        Ok(())
    }

    /// Commit the control point of the open curve and close the gesture.
    ///
    /// The trailing waypoint is snapped to the end of the curve, which by construction is the
    /// point given to [`PathModel::begin_curve`].
    pub fn finalize_curve(&mut self, control: Point) -> Result<(), PathError> {
        if self.open_curve.is_none() {
            return Err(PathError::NoActiveCurve);
        }
        check_finite(&control)?;

        // An open curve always has a segment and two waypoints behind it
        let seg_idx = self.segments.len() - 1;
        let start = self.waypoints[seg_idx].point;
        let end = &mut self.waypoints[seg_idx + 1];
        end.point = geom::quad_bezier_point(&start, &end.point, &control, 1.0);

        self.segments[seg_idx].control = Some(control);
        self.open_curve = None;

        debug!(
            "Curve finalized at ({:.2}, {:.2}) with control ({:.2}, {:.2})",
            end.point.x, end.point.y, control.x, control.y
        );

        Ok(())
    }

    /// Sampled points of the open curve using the last seen control point, for display.
    ///
    /// Returns `None` if no curve is open or the control point hasn't been moved yet.
    pub fn curve_preview(&self) -> Option<Vec<Point>> {
        let control = self.open_curve?.preview_control?;
        let n = self.waypoints.len();

        Some(geom::quad_bezier_sample(
            &self.waypoints[n - 2].point,
            &self.waypoints[n - 1].point,
            &control,
            geom::BEZIER_SAMPLE_STEPS,
        ))
    }

    /// Returns true while a curve gesture is open.
    pub fn is_curve_open(&self) -> bool {
        self.open_curve.is_some()
    }

    /// Replace the side restriction applied to new waypoints.
    ///
    /// Existing waypoints are not re-checked.
    pub fn set_restriction(&mut self, restriction: SideRestriction) {
        self.restriction = restriction;
    }

    pub fn waypoint_at(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Iterate over the segments of the path in traversal order.
    pub fn segments(&self) -> impl Iterator<Item = Segment<'_>> + Clone + '_ {
        self.segments.iter().enumerate().map(move |(i, s)| Segment {
            index: i,
            start: &self.waypoints[i],
            end: &self.waypoints[i + 1],
            kind: s.kind,
            control: s.control,
        })
    }

    /// Set the command on a waypoint, returning the previous command or `None` if there is no
    /// waypoint at `index`.
    pub(crate) fn set_command(&mut self, index: usize, command: ActuatorCmd) -> Option<ActuatorCmd> {
        let wp = self.waypoints.get_mut(index)?;

        Some(std::mem::replace(&mut wp.command, command))
    }

    /// Checks shared by every non-start append.
    fn check_can_append(&self, point: &Point) -> Result<(), PathError> {
        if self.waypoints.is_empty() {
            return Err(PathError::Empty);
        }
        if self.open_curve.is_some() {
            return Err(PathError::CurveInProgress);
        }
        self.check_point(point)
    }

    fn check_point(&self, point: &Point) -> Result<(), PathError> {
        check_finite(point)?;

        if self.restriction.permits(point) {
            Ok(())
        } else {
            Err(PathError::RestrictedRegion(point.x, point.y))
        }
    }
}

/// Exported coordinates must be valid C float literals.
fn check_finite(point: &Point) -> Result<(), PathError> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(())
    } else {
        Err(PathError::NonFinitePoint(point.x, point.y))
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
