//! # Path compiler
//!
//! Walks the path in traversal order and interleaves each waypoint's actuator command with the
//! densified motion of the segment leaving it, producing the flat instruction stream executed by
//! the robot's firmware.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, info};

use crate::{
    densify::MotionProfile,
    geom::{self, Point},
    path::PathModel,
};
use plan_if::edit::ActuatorCmd;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// One unit of execution for the robot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instruction {
    pub kind: InstructionKind,

    /// Waypoint position for actuator instructions, sub-point position for motion steps.
    pub point: Point,

    /// Units: degrees
    pub heading_deg: f64,

    /// Zero for actuator instructions.
    pub speed: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// The kind of an instruction, matching the firmware's command enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionKind {
    MoveWithHeading,
    PickUp,
    Place,
    Scoop,
    Release,
    Clasp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("At least two waypoints are needed to compile a path, found {0}")]
    InsufficientPoints(usize),

    #[error("A curve is still being drawn, finish it before compiling")]
    CurveInProgress,
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl InstructionKind {
    /// The instruction kind executing an actuator command, or `None` for `ActuatorCmd::None`.
    pub fn from_actuator(cmd: ActuatorCmd) -> Option<Self> {
        match cmd {
            ActuatorCmd::None => None,
            ActuatorCmd::PickUp => Some(InstructionKind::PickUp),
            ActuatorCmd::Place => Some(InstructionKind::Place),
            ActuatorCmd::Scoop => Some(InstructionKind::Scoop),
            ActuatorCmd::Release => Some(InstructionKind::Release),
            ActuatorCmd::Clasp => Some(InstructionKind::Clasp),
        }
    }

    pub fn is_motion(&self) -> bool {
        matches!(self, InstructionKind::MoveWithHeading)
    }
}

impl Instruction {
    fn actuator(kind: InstructionKind, point: Point, heading_deg: f64) -> Self {
        Self {
            kind,
            point,
            heading_deg,
            speed: 0.0,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Compile the path into an ordered instruction stream.
///
/// For each segment the start waypoint's command (if any) is emitted with the segment's heading,
/// followed by the segment's motion steps. The final waypoint's command inherits the heading of
/// the last segment as it has no outgoing segment of its own.
pub fn compile(path: &PathModel, profile: &MotionProfile) -> Result<Vec<Instruction>, CompileError> {
    if path.waypoint_count() < 2 {
        return Err(CompileError::InsufficientPoints(path.waypoint_count()));
    }
    if path.is_curve_open() {
        return Err(CompileError::CurveInProgress);
    }

    let mut instrs = Vec::new();
    let mut heading_deg = 0.0;

    for seg in path.segments() {
        heading_deg = geom::heading_deg(&seg.start.point, &seg.end.point);

        if let Some(kind) = InstructionKind::from_actuator(seg.start.command) {
            instrs.push(Instruction::actuator(kind, seg.start.point, heading_deg));
        }

        let steps = profile.densify(&seg);
        debug!(
            "Segment {} ({:?}) densified into {} steps",
            seg.index,
            seg.kind,
            steps.len()
        );

        instrs.extend(steps.into_iter().map(|s| Instruction {
            kind: InstructionKind::MoveWithHeading,
            point: s.point,
            heading_deg: s.heading_deg,
            speed: s.speed,
        }));
    }

    // The length check above guarantees a last waypoint
    if let Some(last) = path.waypoints().last() {
        if let Some(kind) = InstructionKind::from_actuator(last.command) {
            instrs.push(Instruction::actuator(kind, last.point, heading_deg));
        }
    }

    info!(
        "Compiled {} waypoints into {} instructions ({} actuator)",
        path.waypoint_count(),
        instrs.len(),
        instrs.iter().filter(|i| !i.kind.is_motion()).count()
    );

    Ok(instrs)
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_straight_line_motion() {
        let mut path = PathModel::default();
        path.append_start(pt(0.0, 0.0)).unwrap();
        path.append_straight(pt(100.0, 0.0)).unwrap();

        let instrs = compile(&path, &MotionProfile::default()).unwrap();

        assert_eq!(instrs.len(), 33);
        assert!(instrs.iter().all(|i| i.kind == InstructionKind::MoveWithHeading));
        assert!(instrs.iter().all(|i| i.heading_deg == 0.0));

        for i in instrs.iter() {
            let expected = (40.0 + (i.point.x / 100.0) * 60.0).min(100.0);
            assert!((i.speed - expected).abs() < 1e-9);
        }
        assert_eq!(instrs.last().unwrap().point, pt(100.0, 0.0));
        assert_eq!(instrs.last().unwrap().speed, 100.0);
    }

    #[test]
    fn test_insufficient_points() {
        let mut path = PathModel::default();
        assert_eq!(
            compile(&path, &MotionProfile::default()),
            Err(CompileError::InsufficientPoints(0))
        );

        path.append_start(pt(0.0, 0.0)).unwrap();
        path.set_command(0, ActuatorCmd::PickUp);
        assert_eq!(
            compile(&path, &MotionProfile::default()),
            Err(CompileError::InsufficientPoints(1))
        );
    }

    #[test]
    fn test_open_curve_rejected() {
        let mut path = PathModel::default();
        path.append_start(pt(0.0, 0.0)).unwrap();
        path.begin_curve(pt(100.0, 0.0)).unwrap();

        assert_eq!(
            compile(&path, &MotionProfile::default()),
            Err(CompileError::CurveInProgress)
        );

        path.finalize_curve(pt(50.0, 50.0)).unwrap();
        assert!(compile(&path, &MotionProfile::default()).is_ok());
    }

    #[test]
    fn test_actuator_order_and_headings() {
        let mut path = PathModel::default();
        path.append_start(pt(0.0, 0.0)).unwrap();
        path.append_straight(pt(30.0, 0.0)).unwrap();
        path.begin_curve(pt(30.0, 30.0)).unwrap();
        path.finalize_curve(pt(60.0, 15.0)).unwrap();
        path.append_straight(pt(0.0, 30.0)).unwrap();

        path.set_command(0, ActuatorCmd::Clasp);
        path.set_command(2, ActuatorCmd::Scoop);
        path.set_command(3, ActuatorCmd::Release);

        let instrs = compile(&path, &MotionProfile::default()).unwrap();

        let actuators: Vec<&Instruction> = instrs.iter().filter(|i| !i.kind.is_motion()).collect();
        assert_eq!(
            actuators.iter().map(|i| i.kind).collect::<Vec<_>>(),
            vec![
                InstructionKind::Clasp,
                InstructionKind::Scoop,
                InstructionKind::Release
            ]
        );

        // Outgoing segment headings, and the last waypoint inherits the final segment's heading
        assert_eq!(actuators[0].heading_deg, 0.0);
        assert_eq!(actuators[0].point, pt(0.0, 0.0));
        assert_eq!(actuators[1].heading_deg, 180.0);
        assert_eq!(actuators[1].point, pt(30.0, 30.0));
        assert_eq!(actuators[2].heading_deg, 180.0);
        assert_eq!(actuators[2].point, pt(0.0, 30.0));
        assert!(actuators.iter().all(|i| i.speed == 0.0));

        // First instruction is the clasp, last is the release
        assert_eq!(instrs[0].kind, InstructionKind::Clasp);
        assert_eq!(instrs.last().unwrap().kind, InstructionKind::Release);

        // The curve's motion steps sit between the second segment's bounds and keep the chord
        // heading
        let scoop_idx = instrs
            .iter()
            .position(|i| i.kind == InstructionKind::Scoop)
            .unwrap();
        let curve_steps: Vec<_> = instrs[..scoop_idx]
            .iter()
            .filter(|i| i.heading_deg == 90.0)
            .collect();
        assert!(!curve_steps.is_empty());
        assert!(curve_steps.iter().all(|i| i.kind.is_motion()));

        // Every instruction is accounted for by commands plus densified steps
        let motion = instrs.iter().filter(|i| i.kind.is_motion()).count();
        let expected_motion: usize = path
            .segments()
            .map(|s| MotionProfile::default().densify(&s).len())
            .sum();
        assert_eq!(motion, expected_motion);
        assert_eq!(instrs.len(), motion + 3);
    }

    #[test]
    fn test_coincident_waypoints() {
        let mut path = PathModel::default();
        path.append_start(pt(50.0, 50.0)).unwrap();
        path.append_straight(pt(50.0, 50.0)).unwrap();
        path.set_command(1, ActuatorCmd::Place);

        let instrs = compile(&path, &MotionProfile::default()).unwrap();

        assert_eq!(instrs.len(), 2);
        assert_eq!(instrs[0].kind, InstructionKind::MoveWithHeading);
        assert_eq!(instrs[0].point, pt(50.0, 50.0));
        assert_eq!(instrs[0].heading_deg, 0.0);
        assert_eq!(instrs[0].speed, 40.0);
        assert_eq!(instrs[1].kind, InstructionKind::Place);
        assert_eq!(instrs[1].heading_deg, 0.0);
    }
}
