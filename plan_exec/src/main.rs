//! Path planning executable entry point.
//!
//! # Architecture
//!
//! The planner runs as a single batch pass:
//!
//!     - Initialise the session, logging and parameters
//!     - Load the edit script recorded from the path editor
//!     - Replay every edit event into a path editing session
//!     - Compile the finished path into the instruction stream
//!     - Export the struct array and transcript artifacts
//!
//! Usage: `plan_exec <script> [--params <file>] [--out-dir <dir>]`

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod edit_processor;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Result};
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;
use structopt::StructOpt;

// Internal
use plan_lib::{
    compile::Instruction,
    edit::PathEditSession,
    export::{self, ExportReport},
    params::PlanExecParams,
};
use util::{
    archive::Archiver,
    logger::logger_init,
    script_interpreter::ScriptInterpreter,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Command line arguments.
#[derive(Debug, StructOpt)]
#[structopt(name = "plan_exec", about = "Compile a recorded path edit script for the robot")]
struct Args {
    /// Path to the edit script to replay.
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// Parameter file to use instead of `$PLAN_SW_ROOT/params/plan_exec.toml`.
    #[structopt(long, parse(from_os_str))]
    params: Option<PathBuf>,

    /// Directory to write the artifacts to, defaults to the session directory.
    #[structopt(long, parse(from_os_str))]
    out_dir: Option<PathBuf>,
}

/// Archive record of one compiled instruction.
#[derive(Serialize)]
struct InstructionRecord {
    index: usize,
    kind: &'static str,
    x: f64,
    y: f64,
    heading_deg: f64,
    speed: f64,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::from_args();

    // ---- EARLY INITIALISATION ----

    let session = Session::new("plan_exec", "sessions").wrap_err("Failed to create the session")?;

    // Parameters come before the logger as they hold the log levels
    let params: PlanExecParams = match args.params {
        Some(ref p) => util::params::load_path(p),
        None => util::params::load("plan_exec.toml"),
    }
    .wrap_err("Could not load plan_exec params")?;

    logger_init(&params.log, &session).wrap_err("Failed to initialise logging")?;

    info!("Path Planning Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- VALIDATE PARAMETERS ----

    params
        .robot
        .validate()
        .wrap_err("Invalid robot description")?;

    params
        .profile
        .validate()
        .wrap_err("Invalid motion profile")?;

    info!("Exec parameters loaded");
    info!(
        "    Robot: {} x {} mm, {} kg",
        params.robot.width_mm, params.robot.height_mm, params.robot.weight_kg
    );
    info!(
        "    Field: {} px square, side {:?}",
        params.field.size_px(),
        params.side
    );
    info!(
        "    Motion: step {} px, speed {} to {} over {} px",
        params.profile.step_threshold,
        params.profile.base_speed,
        params.profile.max_speed,
        params.profile.ramp_distance
    );

    // ---- LOAD SCRIPT ----

    info!("Loading script from {:?}", args.script);

    let script = ScriptInterpreter::new(&args.script).wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} edit events\n",
        script.get_duration(),
        script.get_num_edits()
    );

    // ---- REPLAY ----

    let mut edit_session =
        PathEditSession::new(params.field, params.side, params.central_line_offset_px);

    let mut edit_arch =
        Archiver::from_path(&session, "edits.csv").wrap_err("Failed to create the edit archive")?;

    let summary = edit_processor::replay(&mut edit_session, script, &mut edit_arch)
        .wrap_err("Failed to archive the edit events")?;

    if summary.rejected > 0 {
        warn!(
            "{} of {} edit events were rejected, see the log for details",
            summary.rejected,
            summary.accepted + summary.rejected
        );
    }

    // ---- COMPILE ----

    let instrs = edit_session
        .compile(&params.profile)
        .wrap_err("Failed to compile the path")?;

    archive_instructions(&session, &instrs).wrap_err("Failed to archive the instructions")?;

    // ---- EXPORT ----

    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| session.session_root.clone());

    let report: ExportReport = export::write_artifacts(&out_dir, &params.artifacts, &instrs)
        .wrap_err("Failed to export the instructions")?;

    info!("C file exported to {:?}", report.struct_array_path);
    info!("TXT file exported to {:?}", report.transcript_path);

    Ok(())
}

/// Write the instruction stream to the session archive.
fn archive_instructions(session: &Session, instrs: &[Instruction]) -> Result<()> {
    let mut arch = Archiver::from_path(session, "instructions.csv")?;

    for (index, i) in instrs.iter().enumerate() {
        arch.serialise(InstructionRecord {
            index,
            kind: i.kind.struct_tag(),
            x: i.point.x,
            y: i.point.y,
            heading_deg: i.heading_deg,
            speed: i.speed,
        })?;
    }

    Ok(())
}
