//! Waypoints and segments

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::geom::Point;
use plan_if::edit::ActuatorCmd;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A point on the path and the actuator command to execute there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub point: Point,
    pub command: ActuatorCmd,
}

/// A view of the connection between two consecutive waypoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    /// Index of the start waypoint, the end waypoint is at `index + 1`.
    pub index: usize,

    pub start: &'a Waypoint,

    pub end: &'a Waypoint,

    pub kind: SegmentKind,

    /// Control point of a curved segment, `None` for straight segments and for a curve whose
    /// gesture has not been finalized.
    pub control: Option<Point>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// How a segment joins its two waypoints, fixed when the trailing waypoint is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Straight,
    Curved,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Waypoint {
    /// A new waypoint with no command.
    pub fn new(point: Point) -> Self {
        Self {
            point,
            command: ActuatorCmd::None,
        }
    }
}
