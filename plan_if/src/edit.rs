//! # Path editing events
//!
//! Each event describes one mouse/keyboard-free interaction with the path editor: placing a
//! waypoint, dragging a curve, moving the selection cursor or pressing a command button.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A command executed by the robot's actuators when it reaches a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActuatorCmd {
    None,
    PickUp,
    Place,
    Scoop,
    Release,
    Clasp,
}

/// The side of the field's central line that the robot is allowed to plan on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    /// No restriction, the whole field may be used.
    None,

    /// Waypoints must be left of the central line.
    Left,

    /// Waypoints must be right of the central line.
    Right,
}

/// A single path editing event.
///
/// Coordinates are in field display units (pixels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditCmd {
    /// Place the start point of the path.
    Start { x: f64, y: f64 },

    /// Append a waypoint joined to the previous one by a straight line.
    Straight { x: f64, y: f64 },

    /// Append a provisional waypoint and open a curve gesture towards it.
    CurveBegin { x: f64, y: f64 },

    /// Move the control point of the open curve (preview only).
    CurveUpdate { x: f64, y: f64 },

    /// Commit the control point of the open curve.
    CurveFinalize { x: f64, y: f64 },

    /// Select the next waypoint, wrapping around at the end of the path.
    SelectNext,

    /// Select the previous waypoint, wrapping around at the start of the path.
    SelectPrev,

    /// Select the waypoint at the given index.
    Select { index: usize },

    /// Assign an actuator command to the selected waypoint.
    Assign { command: ActuatorCmd },

    /// Remove the actuator command from the selected waypoint.
    Remove,

    /// Change the side restriction used for new waypoints.
    SetSide { side: Side },
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum EditParseError {
    #[error("Edit event contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl EditCmd {
    /// Parse a new event from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, EditParseError> {
        serde_json::from_str(json_str).map_err(EditParseError::InvalidJson)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_edit_cmds() {
        assert_eq!(
            EditCmd::from_json(r#"{"type": "START", "x": 10.0, "y": 20.5}"#).unwrap(),
            EditCmd::Start { x: 10.0, y: 20.5 }
        );
        assert_eq!(
            EditCmd::from_json(r#"{"type": "CURVE_FINALIZE", "x": 1, "y": 2}"#).unwrap(),
            EditCmd::CurveFinalize { x: 1.0, y: 2.0 }
        );
        assert_eq!(
            EditCmd::from_json(r#"{"type": "SELECT_NEXT"}"#).unwrap(),
            EditCmd::SelectNext
        );
        assert_eq!(
            EditCmd::from_json(r#"{"type": "ASSIGN", "command": "PICK_UP"}"#).unwrap(),
            EditCmd::Assign {
                command: ActuatorCmd::PickUp
            }
        );
        assert_eq!(
            EditCmd::from_json(r#"{"type": "SET_SIDE", "side": "LEFT"}"#).unwrap(),
            EditCmd::SetSide { side: Side::Left }
        );
    }

    #[test]
    fn test_reject_bad_edit_cmds() {
        assert!(EditCmd::from_json("not json").is_err());
        assert!(EditCmd::from_json(r#"{"type": "TELEPORT"}"#).is_err());
        assert!(EditCmd::from_json(r#"{"type": "STRAIGHT", "x": 1.0}"#).is_err());
        assert!(EditCmd::from_json(r#"{"type": "ASSIGN", "command": "DANCE"}"#).is_err());
    }
}
