//! Logger initialisation for planner executables
//!
//! Messages are split between the console and the session's log file, each with its own minimum
//! level, so the log file can keep the full debug trace of a planning run while the console only
//! shows what the person drawing the path needs. Noisy modules (the per-segment densifier output
//! for example) can be capped with per-module levels.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use log::{self, info};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Logging parameters, usually found in the `[log]` table of an executable's parameter file.
///
/// Levels are given by name, e.g. `"DEBUG"` or `"warn"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogParams {
    /// Minimum level printed to stdout.
    pub stdout_level: LevelFilter,

    /// Minimum level written to the session log file, must include `INFO`.
    pub file_level: LevelFilter,

    /// Level caps for individual modules, keyed by module path (e.g. `plan_lib::compile`).
    pub module_levels: BTreeMap<String, LevelFilter>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log file level of at least `INFO`, found `{0}`")]
    InvalidFileLogLevel(log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for LogParams {
    fn default() -> Self {
        Self {
            stdout_level: LevelFilter::Info,
            file_level: LevelFilter::Debug,
            module_levels: BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// Every line is prefixed with the number of seconds since the session started. Level tags are
/// coloured on stdout and plain in the log file.
///
/// # Notes
///
/// - The file level must be at least `INFO` so the session log always records the run summary.
/// - This function must only be called once per process.
pub fn logger_init(params: &LogParams, session: &session::Session) -> Result<(), LoggerInitError> {
    if params.file_level < log::Level::Info {
        return Err(LoggerInitError::InvalidFileLogLevel(params.file_level));
    }

    let log_file =
        fern::log_file(&session.log_file_path).map_err(LoggerInitError::LogFileInitError)?;

    let mut dispatch =
        fern::Dispatch::new().level(std::cmp::max(params.stdout_level, params.file_level));

    for (module, level) in params.module_levels.iter() {
        dispatch = dispatch.level_for(module.clone(), *level);
    }

    dispatch
        .chain(
            fern::Dispatch::new()
                .level(params.stdout_level)
                .format(|out, message, record| format_record(out, message, record, true))
                .chain(std::io::stdout()),
        )
        .chain(
            fern::Dispatch::new()
                .level(params.file_level)
                .format(|out, message, record| format_record(out, message, record, false))
                .chain(log_file),
        )
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!(
        "    Log levels: stdout {:?}, file {:?}",
        params.stdout_level, params.file_level
    );
    for (module, level) in params.module_levels.iter() {
        info!("    Module level: {} {:?}", module, level);
    }
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn format_record(
    out: fern::FormatCallback,
    message: &fmt::Arguments,
    record: &log::Record,
    coloured: bool,
) {
    let tag = level_tag(record.level(), coloured);

    // Only include the target for debug and trace, the planner's info output is meant to be read
    // by whoever is drawing the path
    if record.level() > log::Level::Info {
        out.finish(format_args!(
            "[{:10.6} {}] {}: {}",
            session::get_elapsed_seconds(),
            tag,
            record.target(),
            message
        ))
    } else {
        out.finish(format_args!(
            "[{:10.6} {}] {}",
            session::get_elapsed_seconds(),
            tag,
            message
        ))
    }
}

/// Get the three letter tag of a log level
fn level_tag(level: log::Level, coloured: bool) -> ColoredString {
    let tag = match level {
        log::Level::Trace => "TRC",
        log::Level::Debug => "DBG",
        log::Level::Info => "INF",
        log::Level::Warn => "WRN",
        log::Level::Error => "ERR",
    };

    if !coloured {
        return tag.normal();
    }

    match level {
        log::Level::Trace => tag.dimmed().italic(),
        log::Level::Debug => tag.dimmed(),
        log::Level::Info => tag.normal(),
        log::Level::Warn => tag.yellow(),
        log::Level::Error => tag.red().bold(),
    }
}
