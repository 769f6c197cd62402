//! Core library for batch-compressing a tree of video files with ffmpeg.
//!
//! This crate discovers video files under an input root, builds one
//! compression job per file (output mirrored under the output root), runs
//! the jobs through a bounded worker pool and aggregates their outcomes.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use batchpress_core::{CoreConfig, EventDispatcher, FfmpegRunner, process_videos};
//! use batchpress_core::events::json_handler::JsonProgressHandler;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! let mut config = CoreConfig::new(
//!     PathBuf::from("/path/to/input"),
//!     PathBuf::from("/path/to/output"),
//! );
//! config.max_workers = 4;
//! config.validate().unwrap();
//!
//! let mut events = EventDispatcher::new();
//! events.add_handler(Arc::new(JsonProgressHandler::new()));
//!
//! let runner = Arc::new(FfmpegRunner::new("/usr/bin/ffmpeg"));
//! let summary = process_videos(&config, runner, &events).unwrap();
//! assert_eq!(summary.succeeded + summary.failed, summary.total);
//! ```

pub mod config;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod external;
pub mod profile;
pub mod reporting;
pub mod util;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder, DEFAULT_MAX_WORKERS, DEFAULT_TOOL_PATH};
pub use discovery::{VIDEO_EXTENSIONS, VideoFile, find_video_files};
pub use dispatch::{WorkerMessage, dispatch_jobs, process_videos, run_job};
pub use error::{CoreError, CoreResult};
pub use events::{Event, EventDispatcher, EventHandler};
pub use external::{FfmpegRunner, ToolRunner};
pub use profile::CompressionProfile;
pub use reporting::{
    BatchAggregator, BatchState, BatchSummary, FailedJob, FailureKind, JobFailure, JobOutcome,
};
pub use util::jobs::{CommandJob, CompressJob, build_jobs};
pub use utils::{format_duration, format_elapsed};
