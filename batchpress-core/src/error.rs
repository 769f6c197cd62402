//! Error types for batchpress-core.
//!
//! Only setup failures (missing input directory, bad configuration, worker
//! pool construction) escape `process_videos`. The per-job variants
//! (`InputMissing`, `ToolLaunch`, `ToolExecution`, `WorkerPanic`) are caught
//! by the dispatcher and recorded in that job's outcome.

use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for batchpress
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Input file no longer exists: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("Failed to launch '{}': {source}", .tool.display())]
    ToolLaunch {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Tool {} for {}: {stderr}", describe_exit(.code), .input.display())]
    ToolExecution {
        input: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Worker panicked while processing {}: {message}", .input.display())]
    WorkerPanic { input: PathBuf, message: String },

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with code {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// Result type for batchpress operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_execution_message_includes_code_and_stderr() {
        let err = CoreError::ToolExecution {
            input: PathBuf::from("clips/a.mp4"),
            code: Some(1),
            stderr: "Invalid data found when processing input".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("exited with code 1"));
        assert!(msg.contains("clips/a.mp4"));
        assert!(msg.contains("Invalid data found"));
    }

    #[test]
    fn test_tool_execution_without_code_reports_signal() {
        let err = CoreError::ToolExecution {
            input: PathBuf::from("a.mkv"),
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("terminated by a signal"));
    }
}
