//! # Actuator command sequencing
//!
//! The robot's gripper has to be clasped before it can scoop, and whatever has been scooped has
//! to be released before the clasp opens again. [`CmdState`] tracks this across the sequence of
//! command assignments and [`try_assign`] validates the next one.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use plan_if::edit::ActuatorCmd;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Command sequencing state of one editing session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CmdState {
    /// True once a clasp has been assigned and until the next release.
    pub clasped: bool,

    /// Number of scoops assigned since the last release.
    pub pending_scoops: u32,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("You must clasp before scooping")]
    ClaspRequired,

    #[error("You cannot release without scooping first")]
    NoPendingScoop,

    #[error("No waypoint is selected")]
    NoWaypointSelected,
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Validate assigning `command` given the current state, returning the state after assignment.
pub fn try_assign(state: CmdState, command: ActuatorCmd) -> Result<CmdState, CommandError> {
    match command {
        ActuatorCmd::Clasp => Ok(CmdState {
            clasped: true,
            ..state
        }),
        ActuatorCmd::Scoop => {
            if !state.clasped {
                return Err(CommandError::ClaspRequired);
            }
            Ok(CmdState {
                pending_scoops: state.pending_scoops + 1,
                ..state
            })
        }
        ActuatorCmd::Release => {
            if state.pending_scoops == 0 {
                return Err(CommandError::NoPendingScoop);
            }
            Ok(CmdState {
                clasped: false,
                pending_scoops: 0,
            })
        }
        ActuatorCmd::PickUp | ActuatorCmd::Place | ActuatorCmd::None => Ok(state),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clasp_scoop_release() {
        let s0 = CmdState::default();
        assert_eq!(
            s0,
            CmdState {
                clasped: false,
                pending_scoops: 0
            }
        );

        let s1 = try_assign(s0, ActuatorCmd::Clasp).unwrap();
        assert!(s1.clasped);

        let s2 = try_assign(s1, ActuatorCmd::Scoop).unwrap();
        assert_eq!(
            s2,
            CmdState {
                clasped: true,
                pending_scoops: 1
            }
        );

        // Scooping doesn't close the clasp, so scooping again is fine
        let s3 = try_assign(s2, ActuatorCmd::Scoop).unwrap();
        assert_eq!(s3.pending_scoops, 2);

        let s4 = try_assign(s3, ActuatorCmd::Release).unwrap();
        assert_eq!(s4, CmdState::default());
    }

    #[test]
    fn test_illegal_assignments() {
        let s0 = CmdState::default();

        assert_eq!(
            try_assign(s0, ActuatorCmd::Scoop),
            Err(CommandError::ClaspRequired)
        );
        assert_eq!(
            try_assign(s0, ActuatorCmd::Release),
            Err(CommandError::NoPendingScoop)
        );

        // Clasped but nothing scooped yet
        let s1 = try_assign(s0, ActuatorCmd::Clasp).unwrap();
        assert_eq!(
            try_assign(s1, ActuatorCmd::Release),
            Err(CommandError::NoPendingScoop)
        );
    }

    #[test]
    fn test_neutral_commands() {
        let s = CmdState {
            clasped: true,
            pending_scoops: 3,
        };

        for cmd in [ActuatorCmd::PickUp, ActuatorCmd::Place, ActuatorCmd::None].iter() {
            assert_eq!(try_assign(s, *cmd), Ok(s));
        }
        assert_eq!(try_assign(s, ActuatorCmd::Clasp), Ok(s));
    }
}
