//! Command execution and job definitions.
//!
//! `command` spawns a tool and classifies its exit; `jobs` describes what a
//! single compression job runs.

pub mod command;
pub mod jobs;

// Re-export commonly used types and functions
pub use command::{log_command, run_command};
pub use jobs::{CommandJob, CompressJob, build_jobs};
