//! # Field model
//!
//! The competition field is a square of tiles measured in millimeters. The planner works in
//! display units (pixels) at a fixed scale, the millimeter mapping is provided for inputs and
//! display only.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::geom::Point;
use plan_if::edit::Side;
use util::maths::lin_map;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Dimensions of the field and the scale it is displayed at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldGeometry {
    /// Side length of one square tile.
    ///
    /// Units: millimeters
    pub tile_size_mm: f64,

    /// Number of tiles along each side of the field.
    pub num_tiles: usize,

    /// Display scale.
    ///
    /// Units: millimeters/pixel
    pub mm_per_px: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A half-plane constraint on where new waypoints may be placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SideRestriction {
    /// Anywhere on the field.
    None,

    /// Points must satisfy `x <= line_x - margin`.
    LeftOf { line_x: f64, margin: f64 },

    /// Points must satisfy `x >= line_x + margin`.
    RightOf { line_x: f64, margin: f64 },
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            tile_size_mm: 600.0,
            num_tiles: 6,
            mm_per_px: 10.0,
        }
    }
}

impl FieldGeometry {
    /// Side length of the field in millimeters.
    pub fn size_mm(&self) -> f64 {
        self.tile_size_mm * self.num_tiles as f64
    }

    /// Side length of the field in display units.
    pub fn size_px(&self) -> f64 {
        self.mm_to_px(self.size_mm())
    }

    /// Display x coordinate of the central line splitting the field into its two sides.
    pub fn central_line_x_px(&self) -> f64 {
        self.size_px() / 2.0
    }

    pub fn mm_to_px(&self, mm: f64) -> f64 {
        lin_map((0.0, self.mm_per_px), (0.0, 1.0), mm)
    }

    pub fn px_to_mm(&self, px: f64) -> f64 {
        lin_map((0.0, 1.0), (0.0, self.mm_per_px), px)
    }

    /// Build the restriction for the given side, keeping `offset_px` clear of the central line.
    pub fn side_restriction(&self, side: Side, offset_px: f64) -> SideRestriction {
        let line_x = self.central_line_x_px();

        match side {
            Side::None => SideRestriction::None,
            Side::Left => SideRestriction::LeftOf {
                line_x,
                margin: offset_px,
            },
            Side::Right => SideRestriction::RightOf {
                line_x,
                margin: offset_px,
            },
        }
    }
}

impl Default for SideRestriction {
    fn default() -> Self {
        SideRestriction::None
    }
}

impl SideRestriction {
    /// Returns true if the point may be used as a waypoint.
    ///
    /// Points exactly on the margin boundary are permitted.
    pub fn permits(&self, point: &Point) -> bool {
        match *self {
            SideRestriction::None => true,
            SideRestriction::LeftOf { line_x, margin } => point.x <= line_x - margin,
            SideRestriction::RightOf { line_x, margin } => point.x >= line_x + margin,
        }
    }
}
