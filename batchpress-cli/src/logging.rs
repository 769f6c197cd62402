// ============================================================================
// batchpress-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and optional file logging
//
// The core library logs through the `log` facade. The CLI installs the
// backend:
// - env_logger for console-only runs (honours RUST_LOG)
// - fern when --log-dir is given, writing to stderr and to a timestamped
//   log file with ANSI colour codes stripped
//
// RUST_LOG=info (default): normal progress output
// RUST_LOG=debug (or --verbose): command lines, state transitions

use std::io::Write;
use std::path::{Path, PathBuf};

use batchpress_core::CoreError;
use console::style;
use log::{Level, LevelFilter, Record};

use crate::error::{CliErrorContext, CliResult};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// # Example
/// ```
/// let log_filename = format!("batchpress_run_{}.log", batchpress_cli::logging::get_timestamp());
/// assert!(log_filename.ends_with(".log"));
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Path of the log file for a run started now.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(format!("batchpress_run_{}.log", get_timestamp()))
}

fn level_filter(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Console rendering: plain text for info, a coloured prefix otherwise.
fn console_line(record: &Record) -> String {
    match record.level() {
        Level::Info => record.args().to_string(),
        Level::Warn => format!("{} {}", style("warning:").yellow().bold(), record.args()),
        Level::Error => format!("{} {}", style("error:").red().bold(), record.args()),
        Level::Debug | Level::Trace => style(format!(
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        ))
        .dim()
        .to_string(),
    }
}

/// Installs env_logger on stderr.
pub fn init_console_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(level_filter(verbose))
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}", console_line(record)))
        .init();
}

/// Installs a fern dispatcher writing to stderr and to a new file in `log_dir`.
///
/// Returns the path of the log file.
pub fn init_file_logging(verbose: bool, log_dir: &Path) -> CliResult<PathBuf> {
    std::fs::create_dir_all(log_dir)
        .cli_with_context(|| format!("Failed to create log directory '{}'", log_dir.display()))?;

    let path = log_file_path(log_dir);
    let file = fern::log_file(&path)
        .cli_with_context(|| format!("Failed to create log file '{}'", path.display()))?;

    fern::Dispatch::new()
        .level(level_filter(verbose))
        .chain(
            fern::Dispatch::new()
                .format(|out, _message, record| out.finish(format_args!("{}", console_line(record))))
                .chain(std::io::stderr()),
        )
        .chain(
            fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "{} {:<5} {}",
                        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                        record.level(),
                        strip_ansi_escapes::strip_str(message.to_string())
                    ))
                })
                .chain(file),
        )
        .apply()
        .map_err(|e| CoreError::Config(format!("Failed to initialise logging: {e}")))?;

    Ok(path)
}
