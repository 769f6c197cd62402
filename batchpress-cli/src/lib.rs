// batchpress-cli/src/lib.rs
//
// Library portion of the batchpress CLI application.
// Contains argument definitions, output handlers and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, CompressArgs};
pub use commands::compress::run_compress;
pub use error::{CliErrorContext, CliResult};
pub use terminal::TerminalEventHandler;
