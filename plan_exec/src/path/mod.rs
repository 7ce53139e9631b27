//! Path model module

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod model;
mod waypoint;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use model::*;
pub use waypoint::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while editing the path.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("The path already has a start point")]
    AlreadyStarted,

    #[error("The path is empty, place a start point first")]
    Empty,

    #[error("There is no curve being drawn")]
    NoActiveCurve,

    #[error("The point ({0:.2}, {1:.2}) is on the restricted side of the field")]
    RestrictedRegion(f64, f64),

    #[error("A curve is still being drawn, finish it before adding another waypoint")]
    CurveInProgress,

    #[error("The point ({0}, {1}) has a non-finite coordinate")]
    NonFinitePoint(f64, f64),
}
