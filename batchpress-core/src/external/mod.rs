// ============================================================================
// batchpress-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Invoking the transcoder
//
// The dispatcher never spawns processes itself. It hands each job to a
// ToolRunner, so tests can substitute a runner that sleeps or fails on
// demand instead of launching ffmpeg.
//
// KEY COMPONENTS:
// - ToolRunner: one blocking invocation per job
// - FfmpegRunner: runs the real executable at a caller-supplied path
// - mocks: scriptable runner for tests (feature "test-mocks")

// ---- Internal crate imports ----
use crate::error::CoreResult;
use crate::util::command::run_command;
use crate::util::jobs::{CommandJob, CompressJob};

// ---- Standard library imports ----
use std::path::{Path, PathBuf};

pub mod mocks;

/// Runs the external tool for a single job.
///
/// Implementations block until the tool exits. They are shared by every
/// worker thread, so they must be `Send + Sync`.
pub trait ToolRunner: Send + Sync {
    /// Returns `Ok(())` only if the tool exited successfully.
    fn run(&self, job: &CompressJob) -> CoreResult<()>;
}

/// Runs ffmpeg (or a compatible executable) from a fixed path.
///
/// The path is not checked up front; a missing or non-executable path
/// surfaces as `CoreError::ToolLaunch` on every job.
#[derive(Debug, Clone)]
pub struct FfmpegRunner {
    tool_path: PathBuf,
}

impl FfmpegRunner {
    pub fn new(tool_path: impl Into<PathBuf>) -> Self {
        Self {
            tool_path: tool_path.into(),
        }
    }

    pub fn tool_path(&self) -> &Path {
        &self.tool_path
    }
}

impl ToolRunner for FfmpegRunner {
    fn run(&self, job: &CompressJob) -> CoreResult<()> {
        let mut cmd = job.get_command(&self.tool_path);
        run_command(&mut cmd, &job.input_path).map(|_| ())
    }
}
