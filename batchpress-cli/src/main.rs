// batchpress-cli/src/main.rs
//
// Entry point for the batchpress command-line tool.
//
// Responsibilities:
// - Parsing arguments with clap.
// - Installing the logger (console, or console plus file with --log-dir).
// - Running the requested command.
// - Mapping the outcome to an exit code: 0 when every file was compressed
//   (or there was nothing to do), 1 when any file failed or the run could
//   not start.

use std::process;

use batchpress_cli::logging::{init_console_logging, init_file_logging};
use batchpress_cli::{Cli, CliResult, Commands, CompressArgs, run_compress};
use clap::Parser;
use console::style;
use log::{debug, error};

const EXIT_FAILURE: i32 = 1;

fn init_logging(args: &CompressArgs, verbose: bool) -> CliResult<()> {
    match &args.log_dir {
        Some(log_dir) => {
            let path = init_file_logging(verbose, log_dir)?;
            debug!("Log file: {}", path.display());
        }
        None => init_console_logging(verbose),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if std::env::var_os("NO_COLOR").is_some() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let Commands::Compress(args) = cli.command;

    // No logger yet, so this one goes straight to stderr.
    if let Err(e) = init_logging(&args, cli.verbose) {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        process::exit(EXIT_FAILURE);
    }

    match run_compress(args, cli.verbose) {
        Ok(summary) if summary.all_succeeded() => {}
        Ok(_) => process::exit(EXIT_FAILURE),
        Err(e) => {
            error!("{e}");
            process::exit(EXIT_FAILURE);
        }
    }
}
