//! # Path editing session
//!
//! A [`PathEditSession`] owns everything mutated while a path is drawn: the path itself, the
//! actuator command sequencing state and the waypoint selection cursor. Every operation either
//! succeeds or leaves the session untouched.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, warn};
use thiserror::Error;

use crate::{
    cmd::{try_assign, CmdState, CommandError},
    compile::{compile, CompileError, Instruction},
    densify::MotionProfile,
    field::{FieldGeometry, SideRestriction},
    geom::Point,
    path::{PathError, PathModel},
};
use plan_if::edit::{ActuatorCmd, EditCmd, Side};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Cyclic cursor over the waypoints of a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCursor {
    selected: Option<usize>,
}

/// The state of one path editing session.
#[derive(Debug, Clone)]
pub struct PathEditSession {
    path: PathModel,
    cmd_state: CmdState,
    cursor: SelectionCursor,

    field: FieldGeometry,
    central_line_offset_px: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("There is no waypoint {0}, the path has {1} waypoints")]
    OutOfRange(usize, usize),
}

/// Any rejected edit.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EditError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Cursor(#[from] CursorError),
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl SelectionCursor {
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select the next waypoint, wrapping to the first. With nothing selected the first waypoint
    /// is selected. No-op on an empty path.
    pub fn advance(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    /// Select the previous waypoint, wrapping to the last. With nothing selected the last
    /// waypoint is selected. No-op on an empty path.
    pub fn retreat(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        });
    }

    pub fn select(&mut self, index: usize, len: usize) -> Result<(), CursorError> {
        if index >= len {
            return Err(CursorError::OutOfRange(index, len));
        }
        self.selected = Some(index);
        Ok(())
    }
}

impl PathEditSession {
    /// Start a new session on the given field with the given side restriction.
    pub fn new(field: FieldGeometry, side: Side, central_line_offset_px: f64) -> Self {
        Self {
            path: PathModel::new(field.side_restriction(side, central_line_offset_px)),
            cmd_state: CmdState::default(),
            cursor: SelectionCursor::default(),
            field,
            central_line_offset_px,
        }
    }

    /// Start a new session with an explicit restriction, independent of any field.
    pub fn with_restriction(restriction: SideRestriction) -> Self {
        Self {
            path: PathModel::new(restriction),
            cmd_state: CmdState::default(),
            cursor: SelectionCursor::default(),
            field: FieldGeometry::default(),
            central_line_offset_px: 0.0,
        }
    }

    pub fn path(&self) -> &PathModel {
        &self.path
    }

    pub fn cmd_state(&self) -> CmdState {
        self.cmd_state
    }

    pub fn selected(&self) -> Option<usize> {
        self.cursor.selected()
    }

    /// Place a point joined by a straight line, or the start point if the path is empty.
    pub fn place_straight(&mut self, point: Point) -> Result<(), PathError> {
        if self.path.is_empty() {
            self.path.append_start(point)
        } else {
            self.path.append_straight(point)
        }
    }

    /// Begin a curve towards a point, or place the start point if the path is empty.
    pub fn place_curve(&mut self, point: Point) -> Result<(), PathError> {
        if self.path.is_empty() {
            self.path.append_start(point)
        } else {
            self.path.begin_curve(point)
        }
    }

    pub fn select_next(&mut self) {
        self.cursor.advance(self.path.waypoint_count());
    }

    pub fn select_prev(&mut self) {
        self.cursor.retreat(self.path.waypoint_count());
    }

    pub fn select(&mut self, index: usize) -> Result<(), CursorError> {
        self.cursor.select(index, self.path.waypoint_count())
    }

    /// Assign a command to the selected waypoint.
    ///
    /// On success the command is stored and the sequencing state advanced, on failure neither
    /// changes.
    pub fn assign_command(&mut self, command: ActuatorCmd) -> Result<(), CommandError> {
        let index = self
            .cursor
            .selected()
            .ok_or(CommandError::NoWaypointSelected)?;

        let new_state = try_assign(self.cmd_state, command)?;

        self.path
            .set_command(index, command)
            .ok_or(CommandError::NoWaypointSelected)?;
        self.cmd_state = new_state;

        debug!("Command {:?} assigned to waypoint {}", command, index);

        Ok(())
    }

    /// Clear the command of the selected waypoint.
    ///
    /// The sequencing state is not rolled back, so removing a clasp or scoop leaves the state as
    /// if it were still assigned.
    pub fn remove_command(&mut self) -> Result<(), CommandError> {
        let index = self
            .cursor
            .selected()
            .ok_or(CommandError::NoWaypointSelected)?;

        self.path
            .set_command(index, ActuatorCmd::None)
            .ok_or(CommandError::NoWaypointSelected)?;

        debug!("Command removed from waypoint {}", index);

        Ok(())
    }

    /// Replace the side restriction for new waypoints.
    pub fn set_side(&mut self, side: Side) {
        self.path.set_restriction(
            self.field
                .side_restriction(side, self.central_line_offset_px),
        );
    }

    /// Apply one editing event.
    pub fn apply(&mut self, cmd: &EditCmd) -> Result<(), EditError> {
        let result: Result<(), EditError> = match *cmd {
            EditCmd::Start { x, y } => self.path.append_start(Point::new(x, y)).map_err(Into::into),
            EditCmd::Straight { x, y } => self
                .path
                .append_straight(Point::new(x, y))
                .map_err(Into::into),
            EditCmd::CurveBegin { x, y } => self
                .path
                .begin_curve(Point::new(x, y))
                .map_err(Into::into),
            EditCmd::CurveUpdate { x, y } => self
                .path
                .update_curve_control(Point::new(x, y))
                .map_err(Into::into),
            EditCmd::CurveFinalize { x, y } => self
                .path
                .finalize_curve(Point::new(x, y))
                .map_err(Into::into),
            EditCmd::SelectNext => {
                self.select_next();
                Ok(())
            }
            EditCmd::SelectPrev => {
                self.select_prev();
                Ok(())
            }
            EditCmd::Select { index } => self.select(index).map_err(Into::into),
            EditCmd::Assign { command } => self.assign_command(command).map_err(Into::into),
            EditCmd::Remove => self.remove_command().map_err(Into::into),
            EditCmd::SetSide { side } => {
                self.set_side(side);
                Ok(())
            }
        };

        if let Err(ref e) = result {
            warn!("Edit {:?} rejected: {}", cmd, e);
        }

        result
    }

    /// Compile the session's path.
    pub fn compile(&self, profile: &MotionProfile) -> Result<Vec<Instruction>, CompileError> {
        compile(&self.path, profile)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn straight_session(n: usize) -> PathEditSession {
        let mut session = PathEditSession::with_restriction(SideRestriction::None);
        for i in 0..n {
            session
                .place_straight(Point::new(10.0 * i as f64, 0.0))
                .unwrap();
        }
        session
    }

    #[test]
    fn test_cursor_wraps() {
        let mut cursor = SelectionCursor::default();

        cursor.advance(0);
        cursor.retreat(0);
        assert_eq!(cursor.selected(), None);

        cursor.advance(3);
        assert_eq!(cursor.selected(), Some(0));
        cursor.advance(3);
        cursor.advance(3);
        assert_eq!(cursor.selected(), Some(2));
        cursor.advance(3);
        assert_eq!(cursor.selected(), Some(0));
        cursor.retreat(3);
        assert_eq!(cursor.selected(), Some(2));

        let mut cursor = SelectionCursor::default();
        cursor.retreat(4);
        assert_eq!(cursor.selected(), Some(3));

        assert_eq!(cursor.select(4, 4), Err(CursorError::OutOfRange(4, 4)));
        assert_eq!(cursor.selected(), Some(3));
        assert_eq!(cursor.select(1, 4), Ok(()));
        assert_eq!(cursor.selected(), Some(1));
    }

    #[test]
    fn test_assign_requires_selection() {
        let mut session = straight_session(2);

        assert_eq!(
            session.assign_command(ActuatorCmd::PickUp),
            Err(CommandError::NoWaypointSelected)
        );
        assert_eq!(
            session.remove_command(),
            Err(CommandError::NoWaypointSelected)
        );
    }

    #[test]
    fn test_clasp_then_scoop_on_start() {
        let mut session = straight_session(2);
        session.select_next();
        assert_eq!(session.selected(), Some(0));

        session.assign_command(ActuatorCmd::Clasp).unwrap();
        session.assign_command(ActuatorCmd::Scoop).unwrap();

        assert_eq!(
            session.cmd_state(),
            CmdState {
                clasped: true,
                pending_scoops: 1
            }
        );
        assert_eq!(
            session.path().waypoint_at(0).unwrap().command,
            ActuatorCmd::Scoop
        );
    }

    #[test]
    fn test_rejected_scoop_leaves_waypoint() {
        let mut session = straight_session(3);
        session.select(1).unwrap();
        session.assign_command(ActuatorCmd::Place).unwrap();

        assert_eq!(
            session.assign_command(ActuatorCmd::Scoop),
            Err(CommandError::ClaspRequired)
        );
        assert_eq!(
            session.path().waypoint_at(1).unwrap().command,
            ActuatorCmd::Place
        );
        assert_eq!(session.cmd_state(), CmdState::default());

        session.select(2).unwrap();
        assert_eq!(
            session.assign_command(ActuatorCmd::Release),
            Err(CommandError::NoPendingScoop)
        );
        assert_eq!(
            session.path().waypoint_at(2).unwrap().command,
            ActuatorCmd::None
        );
    }

    #[test]
    fn test_remove_is_idempotent_and_keeps_state() {
        let mut session = straight_session(2);
        session.select(1).unwrap();
        session.assign_command(ActuatorCmd::Clasp).unwrap();

        session.remove_command().unwrap();
        let once = (session.cmd_state(), *session.path().waypoint_at(1).unwrap());
        session.remove_command().unwrap();
        let twice = (session.cmd_state(), *session.path().waypoint_at(1).unwrap());

        assert_eq!(once, twice);
        assert_eq!(once.1.command, ActuatorCmd::None);

        // The clasp is still considered open
        assert!(session.cmd_state().clasped);
        session.assign_command(ActuatorCmd::Scoop).unwrap();
    }

    #[test]
    fn test_apply_events() -> Result<(), EditError> {
        let mut session = PathEditSession::new(FieldGeometry::default(), Side::Left, 10.0);

        // Events other than START never place the start point
        assert_eq!(
            session.apply(&EditCmd::Straight { x: 20.0, y: 20.0 }),
            Err(EditError::Path(PathError::Empty))
        );
        assert_eq!(
            session.apply(&EditCmd::CurveBegin { x: 20.0, y: 20.0 }),
            Err(EditError::Path(PathError::Empty))
        );
        assert!(session.path().is_empty());
        assert!(!session.path().is_curve_open());

        session.apply(&EditCmd::Start { x: 20.0, y: 20.0 })?;
        assert_eq!(session.path().waypoint_count(), 1);

        session.apply(&EditCmd::Straight { x: 100.0, y: 20.0 })?;
        assert_eq!(
            session.apply(&EditCmd::Straight { x: 175.0, y: 20.0 }),
            Err(EditError::Path(PathError::RestrictedRegion(175.0, 20.0)))
        );

        session.apply(&EditCmd::CurveBegin { x: 100.0, y: 100.0 })?;
        session.apply(&EditCmd::CurveUpdate { x: 150.0, y: 60.0 })?;
        assert_eq!(
            session.apply(&EditCmd::Start { x: 0.0, y: 0.0 }),
            Err(EditError::Path(PathError::AlreadyStarted))
        );
        session.apply(&EditCmd::CurveFinalize { x: 160.0, y: 60.0 })?;

        session.apply(&EditCmd::SelectPrev)?;
        assert_eq!(session.selected(), Some(2));
        session.apply(&EditCmd::Assign {
            command: ActuatorCmd::PickUp,
        })?;
        assert_eq!(
            session.apply(&EditCmd::Select { index: 3 }),
            Err(EditError::Cursor(CursorError::OutOfRange(3, 3)))
        );

        session.apply(&EditCmd::SetSide { side: Side::None })?;
        session.apply(&EditCmd::Straight { x: 300.0, y: 100.0 })?;
        assert_eq!(session.path().waypoint_count(), 4);

        let instrs = session.compile(&MotionProfile::default()).unwrap();
        assert!(instrs
            .iter()
            .any(|i| i.kind == crate::compile::InstructionKind::PickUp));

        Ok(())
    }
}
