// ============================================================================
// batchpress-cli/src/commands/compress.rs
// ============================================================================
//
// COMPRESS COMMAND: Compress a directory tree of videos
//
// Turns the parsed arguments into a CoreConfig, wires up the event handlers
// for the chosen output mode and hands the batch to the core library.

use std::fs;
use std::io::IsTerminal;
use std::sync::Arc;

use batchpress_core::events::json_handler::JsonProgressHandler;
use batchpress_core::{
    BatchSummary, CoreConfig, CoreConfigBuilder, EventDispatcher, FfmpegRunner, process_videos,
};
use log::{debug, info};

use crate::cli::CompressArgs;
use crate::error::{CliErrorContext, CliResult};
use crate::terminal::TerminalEventHandler;

/// Creates and validates the CoreConfig for this run.
fn create_core_config(args: &CompressArgs) -> CliResult<CoreConfig> {
    let config = CoreConfigBuilder::new()
        .input_dir(args.input_dir.clone())
        .output_dir(args.output_dir.clone())
        .tool_path(args.ffmpeg_path.clone())
        .max_workers(args.jobs as usize)
        .build();

    config.validate()?;
    Ok(config)
}

/// The output root is created before any discovery, once the roots are
/// known to be distinct. Per-file subdirectories are created by the workers.
fn prepare_output_dir(config: &CoreConfig) -> CliResult<()> {
    config.validate_roots()?;
    fs::create_dir_all(&config.output_dir).cli_with_context(|| {
        format!("Failed to create output directory '{}'", config.output_dir.display())
    })
}

fn build_dispatcher(args: &CompressArgs, verbose: bool) -> EventDispatcher {
    let mut events = EventDispatcher::new();
    if args.json {
        events.add_handler(Arc::new(JsonProgressHandler::new()));
    } else {
        let use_bar = !args.no_progress && !verbose && std::io::stderr().is_terminal();
        events.add_handler(Arc::new(TerminalEventHandler::new(use_bar)));
    }
    events
}

/// Runs the `compress` command and returns the batch summary.
///
/// Per-file failures are part of the summary; only fatal conditions such as
/// a missing input directory are returned as errors.
pub fn run_compress(args: CompressArgs, verbose: bool) -> CliResult<BatchSummary> {
    let config = create_core_config(&args)?;
    prepare_output_dir(&config)?;

    if !args.json {
        info!("Input directory:  {}", config.input_dir.display());
        info!("Output directory: {}", config.output_dir.display());
    }
    debug!("ffmpeg: {}", config.tool_path.display());
    debug!("Max workers: {}", config.max_workers);
    debug!("Run started: {}", chrono::Local::now());

    let events = build_dispatcher(&args, verbose);
    let runner = Arc::new(FfmpegRunner::new(config.tool_path.clone()));

    process_videos(&config, runner, &events)
}
