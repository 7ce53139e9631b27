//! Parameters for the planning executable

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use thiserror::Error;

use crate::{densify::MotionProfile, export::ArtifactNames, field::FieldGeometry};
use plan_if::edit::Side;
use util::logger::LogParams;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the planning executable, loaded from `plan_exec.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanExecParams {
    /// Field dimensions and display scale.
    #[serde(default)]
    pub field: FieldGeometry,

    /// The side of the field the robot starts on.
    pub side: Side,

    /// Clearance kept between waypoints and the central line when a side is selected.
    ///
    /// Units: display units
    pub central_line_offset_px: f64,

    /// Densification and speed ramp.
    #[serde(default)]
    pub profile: MotionProfile,

    /// The robot the path is planned for.
    pub robot: RobotInfo,

    /// Names of the exported files.
    #[serde(default)]
    pub artifacts: ArtifactNames,

    /// Console and log file levels.
    #[serde(default)]
    pub log: LogParams,
}

/// Physical description of the robot.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RobotInfo {
    /// Units: millimeters
    pub width_mm: f64,

    /// Units: millimeters
    pub height_mm: f64,

    /// Units: kilograms
    pub weight_kg: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RobotInfoError {
    #[error("Robot {0} must be a positive number, found {1}")]
    InvalidDimension(&'static str, f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RobotInfo {
    /// Check that every dimension is a finite positive number.
    pub fn validate(&self) -> Result<(), RobotInfoError> {
        let dims = [
            ("width", self.width_mm),
            ("height", self.height_mm),
            ("weight", self.weight_kg),
        ];

        for &(name, value) in dims.iter() {
            if !value.is_finite() || value <= 0.0 {
                return Err(RobotInfoError::InvalidDimension(name, value));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_params() {
        let params: PlanExecParams = util::params::from_str(
            r#"
            side = "LEFT"
            central_line_offset_px = 10.0

            [profile]
            step_threshold = 5.0

            [robot]
            width_mm = 350.0
            height_mm = 400.0
            weight_kg = 6.5
            "#,
        )
        .unwrap();

        assert_eq!(params.side, Side::Left);
        assert_eq!(params.field, FieldGeometry::default());
        assert_eq!(params.profile.step_threshold, 5.0);
        assert_eq!(params.profile.base_speed, 40.0);
        assert_eq!(params.artifacts, ArtifactNames::default());
        assert_eq!(params.log, LogParams::default());
        assert!(params.robot.validate().is_ok());
    }

    #[test]
    fn test_degenerate_profile_rejected() {
        let params: PlanExecParams = util::params::from_str(
            r#"
            side = "NONE"
            central_line_offset_px = 10.0

            [profile]
            step_threshold = 0.0
            ramp_distance = 0.0

            [robot]
            width_mm = 350.0
            height_mm = 400.0
            weight_kg = 6.5
            "#,
        )
        .unwrap();

        assert!(params.profile.validate().is_err());
    }

    #[test]
    fn test_robot_info_validation() {
        let mut robot = RobotInfo {
            width_mm: 350.0,
            height_mm: 400.0,
            weight_kg: 6.5,
        };
        assert!(robot.validate().is_ok());

        robot.height_mm = 0.0;
        assert_eq!(
            robot.validate(),
            Err(RobotInfoError::InvalidDimension("height", 0.0))
        );

        robot.height_mm = 400.0;
        robot.weight_kg = f64::NAN;
        assert!(robot.validate().is_err());
    }
}
