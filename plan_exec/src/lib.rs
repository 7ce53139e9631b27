//! # Planner library.
//!
//! The path planning core: a path of waypoints drawn on the field, the actuator commands attached
//! to them and the compiler turning both into the instruction stream run by the robot.
//! This library allows other crates in the workspace (and the benchmarks) to access it.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Geometry primitives - distances, headings and quadratic Bezier curves
pub mod geom;

/// Field model - dimensions, display scale and side restrictions
pub mod field;

/// Path model - waypoints joined by straight or curved segments
pub mod path;

/// Command sequencing - validates clasp/scoop/release ordering
pub mod cmd;

/// Motion densifier - turns segments into dense motion steps
pub mod densify;

/// Compiler - interleaves actuator commands and motion steps
pub mod compile;

/// Exporter - renders and writes the instruction stream artifacts
pub mod export;

/// Edit session - applies editing events to a path
pub mod edit;

/// Executable parameters
pub mod params;
