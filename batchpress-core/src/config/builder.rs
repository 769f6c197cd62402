// ============================================================================
// batchpress-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent API for assembling a CoreConfig. Unset fields fall back to the
// defaults in config/mod.rs.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::CoreConfig;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use batchpress_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("/path/to/input"))
///     .output_dir(PathBuf::from("/path/to/output"))
///     .max_workers(2)
///     .build();
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    tool_path: Option<PathBuf>,
    max_workers: Option<usize>,
}

impl CoreConfigBuilder {
    /// Creates a new CoreConfigBuilder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input directory.
    pub fn input_dir(mut self, input_dir: PathBuf) -> Self {
        self.input_dir = Some(input_dir);
        self
    }

    /// Sets the output directory.
    pub fn output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    /// Sets the path to the ffmpeg executable.
    pub fn tool_path(mut self, tool_path: PathBuf) -> Self {
        self.tool_path = Some(tool_path);
        self
    }

    /// Sets the maximum number of concurrent tool invocations.
    pub fn max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = Some(max_workers);
        self
    }

    /// Builds the CoreConfig. Validation is left to [`CoreConfig::validate`].
    pub fn build(self) -> CoreConfig {
        let defaults = CoreConfig::default();
        CoreConfig {
            input_dir: self.input_dir.unwrap_or(defaults.input_dir),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            tool_path: self.tool_path.unwrap_or(defaults.tool_path),
            max_workers: self.max_workers.unwrap_or(defaults.max_workers),
            profile: defaults.profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MAX_WORKERS, DEFAULT_TOOL_PATH};

    #[test]
    fn test_builder_defaults() {
        let config = CoreConfigBuilder::new()
            .input_dir(PathBuf::from("in"))
            .output_dir(PathBuf::from("out"))
            .build();

        assert_eq!(config.input_dir, PathBuf::from("in"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.tool_path, PathBuf::from(DEFAULT_TOOL_PATH));
        assert_eq!(config.max_workers, DEFAULT_MAX_WORKERS);
    }

    #[test]
    fn test_builder_overrides() {
        let config = CoreConfigBuilder::new()
            .tool_path(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"))
            .max_workers(3)
            .build();

        assert_eq!(config.tool_path, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(config.max_workers, 3);
    }
}
