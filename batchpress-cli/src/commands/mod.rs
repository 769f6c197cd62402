//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `compress` command.
pub mod compress;

pub use compress::run_compress;
