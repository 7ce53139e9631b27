//! # Instruction stream export
//!
//! Serialises a compiled instruction stream into the two artifacts consumed downstream:
//!
//! - a C struct array which is compiled straight into the robot's firmware,
//! - a human readable transcript with one line per instruction.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{info, warn};
use serde::Deserialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::compile::{Instruction, InstructionKind};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Name of the instruction array in the struct array artifact.
pub const ARRAY_NAME: &str = "autonomous_commands";

/// Everything in the struct array artifact before the array's elements.
const STRUCT_ARRAY_HEADER: &str = "#include <stddef.h>

typedef enum {
    CMD_MOVE_WITH_HEADING,
    CMD_PICK_UP,
    CMD_PLACE,
    CMD_SCOOP,
    CMD_RELEASE,
    CMD_CLASP
} CommandType;

typedef struct {
    CommandType command;
    float x;
    float y;
    float heading;
    float speed;
} Command;

";

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// File names of the two artifacts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArtifactNames {
    pub struct_array: String,
    pub transcript: String,
}

/// Where the artifacts were written.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub struct_array_path: PathBuf,
    pub transcript_path: PathBuf,
    pub num_instructions: usize,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export failed, could not write {0:?}: {1}")]
    Io(PathBuf, std::io::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            struct_array: format!("{}.cpp", ARRAY_NAME),
            transcript: format!("{}.txt", ARRAY_NAME),
        }
    }
}

impl InstructionKind {
    /// Tag of this kind in the firmware's `CommandType` enumeration.
    pub fn struct_tag(&self) -> &'static str {
        match self {
            InstructionKind::MoveWithHeading => "CMD_MOVE_WITH_HEADING",
            InstructionKind::PickUp => "CMD_PICK_UP",
            InstructionKind::Place => "CMD_PLACE",
            InstructionKind::Scoop => "CMD_SCOOP",
            InstructionKind::Release => "CMD_RELEASE",
            InstructionKind::Clasp => "CMD_CLASP",
        }
    }

    /// Name of this kind in the transcript.
    pub fn transcript_name(&self) -> &'static str {
        match self {
            InstructionKind::MoveWithHeading => "MOVE",
            InstructionKind::PickUp => "PICK UP",
            InstructionKind::Place => "PLACE",
            InstructionKind::Scoop => "SCOOP",
            InstructionKind::Release => "RELEASE",
            InstructionKind::Clasp => "CLASP",
        }
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Render the C struct array artifact.
///
/// Positions are written at full precision, headings and motion speeds to two decimal places.
pub fn to_struct_array(instrs: &[Instruction]) -> String {
    let mut out = String::from(STRUCT_ARRAY_HEADER);

    // Writing into a String can't fail, so the results are ignored below
    let _ = writeln!(out, "Command {}[] = {{", ARRAY_NAME);

    for i in instrs {
        if i.kind.is_motion() {
            let _ = writeln!(
                out,
                "    {{ {}, {}, {}, {:.2}, {:.2} }},",
                i.kind.struct_tag(),
                i.point.x,
                i.point.y,
                i.heading_deg,
                i.speed
            );
        } else {
            let _ = writeln!(
                out,
                "    {{ {}, {}, {}, {:.2}, 0 }},",
                i.kind.struct_tag(),
                i.point.x,
                i.point.y,
                i.heading_deg
            );
        }
    }

    out.push_str("};\n");
    let _ = writeln!(
        out,
        "const size_t num_{0} = sizeof({0}) / sizeof({0}[0]);",
        ARRAY_NAME
    );

    out
}

/// Render the transcript artifact.
pub fn to_transcript(instrs: &[Instruction]) -> String {
    let mut out = String::new();

    for i in instrs {
        if i.kind.is_motion() {
            let _ = writeln!(
                out,
                "{} to ({:.2}, {:.2}) at heading {:.2} and speed {:.2}",
                i.kind.transcript_name(),
                i.point.x,
                i.point.y,
                i.heading_deg,
                i.speed
            );
        } else {
            let _ = writeln!(
                out,
                "{} at ({:.2}, {:.2}) with heading {:.2}",
                i.kind.transcript_name(),
                i.point.x,
                i.point.y,
                i.heading_deg
            );
        }
    }

    out
}

/// Write both artifacts into `dir`.
///
/// Each artifact is written to a temporary file first and only renamed into place once both
/// have been written, so an `Ok` means both files are complete.
pub fn write_artifacts<P: AsRef<Path>>(
    dir: P,
    names: &ArtifactNames,
    instrs: &[Instruction],
) -> Result<ExportReport, ExportError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| ExportError::Io(dir.to_path_buf(), e))?;

    let artifacts = [
        (dir.join(&names.struct_array), to_struct_array(instrs)),
        (dir.join(&names.transcript), to_transcript(instrs)),
    ];

    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(artifacts.len());

    for (path, contents) in artifacts.iter() {
        let tmp_path = tmp_path_for(path);

        if let Err(e) = fs::write(&tmp_path, contents) {
            discard(&staged);
            let _ = fs::remove_file(&tmp_path);
            return Err(ExportError::Io(path.clone(), e));
        }

        staged.push((tmp_path, path.as_path()));
    }

    for (i, (tmp_path, path)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(tmp_path, path) {
            discard(&staged[i..]);
            return Err(ExportError::Io(path.to_path_buf(), e));
        }
    }

    let report = ExportReport {
        struct_array_path: artifacts[0].0.clone(),
        transcript_path: artifacts[1].0.clone(),
        num_instructions: instrs.len(),
    };

    info!(
        "Exported {} instructions to {:?} and {:?}",
        report.num_instructions, report.struct_array_path, report.transcript_path
    );

    Ok(report)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Remove temporary files that won't be renamed into place.
fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp_path, _) in staged {
        if let Err(e) = fs::remove_file(tmp_path) {
            warn!("Could not remove temporary export file {:?}: {}", tmp_path, e);
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
