//! Configuration structures and constants for the batchpress-core library.
//!
//! This module holds the paths and concurrency bound for a batch run. The
//! compression profile itself is fixed policy (see [`crate::profile`]) and
//! is carried here only so tests can inspect it.

mod builder;

use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};
use crate::profile::CompressionProfile;
use crate::utils::resolve_path;

pub use builder::CoreConfigBuilder;

// Default constants

/// Default number of concurrent ffmpeg invocations.
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Default tool executable, resolved through `PATH`.
pub const DEFAULT_TOOL_PATH: &str = "ffmpeg";

/// Main configuration structure for the batchpress-core library.
///
/// Typically created by the consumer of the library (e.g., batchpress-cli)
/// and passed to [`crate::process_videos`].
///
/// # Examples
///
/// ```rust
/// use batchpress_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("/videos/raw"))
///     .output_dir(PathBuf::from("/videos/compressed"))
///     .tool_path(PathBuf::from("/usr/bin/ffmpeg"))
///     .max_workers(4)
///     .build();
///
/// assert_eq!(config.max_workers, 4);
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Root of the tree to scan for video files
    pub input_dir: PathBuf,

    /// Root under which the mirrored, compressed tree is written
    pub output_dir: PathBuf,

    /// Path to the ffmpeg executable
    pub tool_path: PathBuf,

    /// Maximum number of tool invocations in flight at once
    pub max_workers: usize,

    /// Fixed transcoding profile applied to every job
    pub profile: CompressionProfile,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            tool_path: PathBuf::from(DEFAULT_TOOL_PATH),
            max_workers: DEFAULT_MAX_WORKERS,
            profile: CompressionProfile::default(),
        }
    }
}

impl CoreConfig {
    /// Creates a configuration with default tool path and worker count.
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            ..Self::default()
        }
    }

    /// Checks the settings that would make a batch meaningless or destructive.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_workers == 0 {
            return Err(CoreError::Config(
                "max_workers must be at least 1".to_string(),
            ));
        }

        if self.tool_path.as_os_str().is_empty() {
            return Err(CoreError::Config("tool path must not be empty".to_string()));
        }

        // ffmpeg would be reading and overwriting the same file.
        if self.input_dir == self.output_dir {
            return Err(CoreError::Config(format!(
                "output directory must differ from input directory ({})",
                self.input_dir.display()
            )));
        }

        Ok(())
    }

    /// Checks the roots against the filesystem.
    ///
    /// The input root must be an existing directory. The output root, after
    /// resolving symlinks, `.` and `..`, must be neither the input root nor
    /// inside it: ffmpeg cannot write over its own input, and outputs under
    /// the input would be picked up as inputs by the next run.
    pub fn validate_roots(&self) -> CoreResult<()> {
        if !self.input_dir.is_dir() {
            return Err(CoreError::DirectoryNotFound(self.input_dir.clone()));
        }

        let input = resolve_path(&self.input_dir)?;
        let output = resolve_path(&self.output_dir)?;

        if output == input {
            return Err(CoreError::Config(format!(
                "output directory {} is the input directory",
                self.output_dir.display()
            )));
        }
        if output.starts_with(&input) {
            return Err(CoreError::Config(format!(
                "output directory {} is inside the input directory {}",
                self.output_dir.display(),
                self.input_dir.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CoreConfig::default();
        assert_eq!(config.max_workers, DEFAULT_MAX_WORKERS);
        assert_eq!(config.tool_path, PathBuf::from("ffmpeg"));
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = CoreConfig::new(PathBuf::from("in"), PathBuf::from("out"));
        config.max_workers = 0;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_same_input_and_output() {
        let config = CoreConfig::new(PathBuf::from("videos"), PathBuf::from("videos"));
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_validate_roots_rejects_aliased_output() {
        let dir = tempfile::tempdir().unwrap();
        let videos = dir.path().join("videos");
        std::fs::create_dir_all(&videos).unwrap();

        // Passes the lexical check but names the same directory.
        let config = CoreConfig::new(videos.clone(), videos.join("sub").join(".."));
        assert!(config.validate().is_ok());
        assert!(matches!(config.validate_roots(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_validate_roots_rejects_output_inside_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig::new(dir.path().to_path_buf(), dir.path().join("compressed"));
        assert!(matches!(config.validate_roots(), Err(CoreError::Config(_))));
        assert!(!dir.path().join("compressed").exists());
    }

    #[test]
    fn test_validate_roots_accepts_sibling_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("raw");
        std::fs::create_dir_all(&input).unwrap();

        let config = CoreConfig::new(input, dir.path().join("raw-compressed"));
        assert!(config.validate_roots().is_ok());
    }

    #[test]
    fn test_validate_roots_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig::new(dir.path().join("missing"), dir.path().join("out"));
        assert!(matches!(config.validate_roots(), Err(CoreError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_validate_accepts_distinct_dirs() {
        let config = CoreConfig::new(PathBuf::from("in"), PathBuf::from("out"));
        assert!(config.validate().is_ok());
    }
}
