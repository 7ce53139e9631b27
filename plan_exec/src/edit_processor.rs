//! # Edit processor module
//!
//! Replays the events of an edit script into a path editing session, archiving the outcome of
//! every event.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};
use serde::Serialize;

// Internal
use plan_lib::edit::PathEditSession;
use util::{
    archive::{ArchiveError, Archiver},
    script_interpreter::ScriptInterpreter,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Archive record of one applied edit event.
#[derive(Serialize)]
struct EditRecord {
    exec_time_s: f64,
    event: String,
    accepted: bool,
    error: String,
    num_waypoints: usize,
    selected: Option<usize>,
    clasped: bool,
    pending_scoops: u32,
}

/// Summary of a replayed script.
pub(crate) struct ReplaySummary {
    pub accepted: usize,
    pub rejected: usize,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Apply every event of the script to the session.
///
/// Rejected events are archived and replay continues with the next event.
pub(crate) fn replay(
    session: &mut PathEditSession,
    script: ScriptInterpreter,
    arch: &mut Archiver,
) -> Result<ReplaySummary, ArchiveError> {
    let mut summary = ReplaySummary {
        accepted: 0,
        rejected: 0,
    };

    for edit in script {
        let result = session.apply(&edit.cmd);

        match result {
            Ok(_) => summary.accepted += 1,
            Err(_) => {
                debug!("Event at {:.2} s rejected", edit.exec_time_s);
                summary.rejected += 1;
            }
        }

        let state = session.cmd_state();
        arch.serialise(EditRecord {
            exec_time_s: edit.exec_time_s,
            event: format!("{:?}", edit.cmd),
            accepted: result.is_ok(),
            error: result.err().map(|e| e.to_string()).unwrap_or_default(),
            num_waypoints: session.path().waypoint_count(),
            selected: session.selected(),
            clasped: state.clasped,
            pending_scoops: state.pending_scoops,
        })?;
    }

    info!(
        "Script replayed: {} events accepted, {} rejected",
        summary.accepted, summary.rejected
    );

    Ok(summary)
}
