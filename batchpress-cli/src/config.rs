// batchpress-cli/src/config.rs
//
// Defines default configuration constants for the `batchpress-cli` application.

pub const DEFAULT_FFMPEG: &str = batchpress_core::DEFAULT_TOOL_PATH;
pub const DEFAULT_JOBS: u32 = batchpress_core::DEFAULT_MAX_WORKERS as u32;
