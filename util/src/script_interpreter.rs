//! # Edit script interpreter module
//!
//! This module provides an interpreter for path edit scripts, allowing a recorded sequence of
//! path editing events to be replayed into the planner without a display.
//!
//! A script is a series of entries of the form `<time_s>: <event json>;`, for example
//!
//! ```text
//! 0.0: {"type": "START", "x": 20.0, "y": 40.0};
//! 1.5: {"type": "STRAIGHT", "x": 120.0, "y": 40.0};
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use regex::Regex;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use thiserror::Error;

// Internal
use plan_if::edit::{EditCmd, EditParseError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An edit event which is scripted to occur at a specific time.
#[derive(Debug, Clone)]
pub struct ScriptedEdit {
    /// The time the event was recorded at
    pub exec_time_s: f64,

    /// The event itself
    pub cmd: EditCmd,
}

/// A script interpreter.
///
/// After initialising with the path to the script use `.next_edit` (or iterate) to acquire the
/// events in the order they were recorded.
pub struct ScriptInterpreter {
    edits: VecDeque<ScriptedEdit>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0}")]
    ScriptNotFound(String),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)"
    )]
    InvalidTimestamp(String),

    #[error("Script line {0} is not a `<time_s>: <event json>;` entry: {1}")]
    InvalidLine(usize, String),

    #[error("Script event at {0} s is earlier than the previous event at {1} s")]
    OutOfOrder(f64, f64),

    #[error("Script contains an invalid edit event at {0} s: {1}")]
    InvalidEdit(f64, EditParseError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {
    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {
        let path = script_path.as_ref();

        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path.display().to_string()));
        }

        let script = fs::read_to_string(path).map_err(ScriptError::ScriptLoadError)?;

        Self::from_script_str(&script)
    }

    /// Create a new interpreter from the contents of a script.
    ///
    /// Each non-blank line must hold exactly one entry.
    pub fn from_script_str(script: &str) -> Result<Self, ScriptError> {
        let mut edits: VecDeque<ScriptedEdit> = VecDeque::new();

        // Go through the script executing __the magic regex__ on each line.
        let re = Regex::new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);\s*$")
            .expect("Edit script regex is invalid");

        for (line_idx, line) in script.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let cap = re
                .captures(line)
                .ok_or_else(|| ScriptError::InvalidLine(line_idx + 1, line.trim().to_string()))?;

            let exec_time_s: f64 = cap[1]
                .parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            // Events must be replayed in the order they happened
            if let Some(prev) = edits.back() {
                if exec_time_s < prev.exec_time_s {
                    return Err(ScriptError::OutOfOrder(exec_time_s, prev.exec_time_s));
                }
            }

            let cmd = EditCmd::from_json(&cap[3])
                .map_err(|e| ScriptError::InvalidEdit(exec_time_s, e))?;

            edits.push_back(ScriptedEdit { exec_time_s, cmd });
        }

        if edits.is_empty() {
            return Err(ScriptError::ScriptEmpty);
        }

        Ok(ScriptInterpreter { edits })
    }

    /// Pop the next edit event, or `None` at the end of the script.
    pub fn next_edit(&mut self) -> Option<ScriptedEdit> {
        self.edits.pop_front()
    }

    /// Get the number of edit events remaining in the script
    pub fn get_num_edits(&self) -> usize {
        self.edits.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.edits.back() {
            Some(c) => c.exec_time_s,
            None => 0f64,
        }
    }
}

impl Iterator for ScriptInterpreter {
    type Item = ScriptedEdit;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_edit()
    }
}
