//! File discovery module for finding video files to process.
//!
//! Walks the input tree recursively and collects every regular file whose
//! extension (case-insensitive) is one of [`VIDEO_EXTENSIONS`], together with
//! its path relative to the input root.

use crate::error::{CoreError, CoreResult};

use log::{debug, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions recognized as video files, compared case-insensitively.
pub const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "avi", "mov", "mkv", "wmv"];

/// A discovered video file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoFile {
    /// Full path to the file (input root joined with `relative_path`)
    pub absolute_path: PathBuf,

    /// Path of the file relative to the input root
    pub relative_path: PathBuf,
}

/// Returns true if the file name ends in `.` plus one of the recognized
/// extensions. A bare `.mp4` counts.
#[must_use]
pub fn has_video_extension(path: &Path) -> bool {
    path.file_name().is_some_and(|name| {
        let name = name.to_string_lossy().to_ascii_lowercase();
        VIDEO_EXTENSIONS.iter().any(|ext| {
            name.strip_suffix(ext)
                .is_some_and(|stem| stem.ends_with('.'))
        })
    })
}

/// Finds every video file beneath `input_dir`, at any depth.
///
/// Symlinks to files are included; symlinked directories are not
/// followed. Entries that cannot be read are logged and
/// skipped. The result is sorted by relative path.
///
/// # Returns
///
/// * `Ok(Vec<VideoFile>)` - The discovered files; empty if the tree holds none
/// * `Err(CoreError::DirectoryNotFound)` - If `input_dir` is missing or not a directory
///
/// # Examples
///
/// ```rust,no_run
/// use batchpress_core::find_video_files;
/// use std::path::Path;
///
/// let files = find_video_files(Path::new("/path/to/videos")).unwrap();
/// for file in &files {
///     println!("{}", file.relative_path.display());
/// }
/// ```
pub fn find_video_files(input_dir: &Path) -> CoreResult<Vec<VideoFile>> {
    if !input_dir.is_dir() {
        return Err(CoreError::DirectoryNotFound(input_dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input_dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", input_dir.display(), e);
                continue;
            }
        };

        // Symlinked files count; symlinked directories are not descended.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file || !has_video_extension(entry.path()) {
            continue;
        }

        let relative_path = entry
            .path()
            .strip_prefix(input_dir)
            .map_err(|_| {
                CoreError::PathError(format!(
                    "{} is not under {}",
                    entry.path().display(),
                    input_dir.display()
                ))
            })?
            .to_path_buf();

        files.push(VideoFile {
            absolute_path: entry.into_path(),
            relative_path,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    debug!("Discovered {} video file(s) in {}", files.len(), input_dir.display());

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_video_extension() {
        assert!(has_video_extension(Path::new("a.mp4")));
        assert!(has_video_extension(Path::new("dir/B.MKV")));
        assert!(has_video_extension(Path::new("clip.WmV")));
        assert!(!has_video_extension(Path::new("notes.txt")));
        assert!(!has_video_extension(Path::new("mp4")));
        assert!(!has_video_extension(Path::new("archive.mp4.zip")));
        assert!(has_video_extension(Path::new("dir/.mp4")));
        assert!(has_video_extension(Path::new(".MOV")));
        assert!(!has_video_extension(Path::new("dir/xmp4")));
    }
}
