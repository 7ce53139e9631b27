//! # Planning interface crate.
//!
//! Provides the common interface definitions between a source of path editing events and the
//! path planner.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Path editing events and the enums they carry
pub mod edit;
