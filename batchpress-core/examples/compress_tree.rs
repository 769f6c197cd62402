use std::path::PathBuf;
use std::sync::Arc;

use batchpress_core::events::json_handler::JsonProgressHandler;
use batchpress_core::{CoreConfig, CoreResult, EventDispatcher, FfmpegRunner, process_videos};

fn main() -> CoreResult<()> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <input_dir> <output_dir> [workers]", args[0]);
        std::process::exit(1);
    }

    let mut config = CoreConfig::new(PathBuf::from(&args[1]), PathBuf::from(&args[2]));
    if let Some(workers) = args.get(3).and_then(|w| w.parse().ok()) {
        config.max_workers = workers;
    }

    let mut events = EventDispatcher::new();
    events.add_handler(Arc::new(JsonProgressHandler::new()));

    let runner = Arc::new(FfmpegRunner::new(config.tool_path.clone()));
    let summary = process_videos(&config, runner, &events)?;

    eprintln!(
        "{} of {} videos compressed, {} failed",
        summary.succeeded, summary.total, summary.failed
    );
    for failed in &summary.failures {
        eprintln!("  {}: {}", failed.relative_path.display(), failed.failure.message);
    }

    Ok(())
}
