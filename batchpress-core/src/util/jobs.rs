use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::discovery::VideoFile;
use crate::error::{CoreError, CoreResult};
use crate::profile::CompressionProfile;

/// A trait for jobs that run as a single external command
pub trait CommandJob {
    /// Full argument vector passed to the tool (everything after the program)
    fn invocation_args(&self) -> Vec<OsString>;

    /// Build the command for the given tool executable
    fn get_command(&self, tool: &Path) -> Command {
        let mut cmd = Command::new(tool);
        cmd.args(self.invocation_args());
        cmd
    }
}

/// Compresses one input file to one output file using the fixed profile.
///
/// Owned by exactly one worker for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressJob {
    /// Submission index within the batch
    pub id: usize,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Input path relative to the input root, kept for reporting
    pub relative_path: PathBuf,
    /// Profile arguments placed between the input and output paths
    pub profile_args: Vec<String>,
}

impl CompressJob {
    /// Re-roots the file's relative path under `output_root`.
    pub fn from_video(
        id: usize,
        video: VideoFile,
        output_root: &Path,
        profile: &CompressionProfile,
    ) -> Self {
        Self {
            id,
            output_path: output_root.join(&video.relative_path),
            input_path: video.absolute_path,
            relative_path: video.relative_path,
            profile_args: profile.to_args(),
        }
    }

    /// Creates the output file's parent directory.
    ///
    /// Safe to call from several workers at once for the same directory:
    /// `create_dir_all` succeeds when the directory already exists.
    pub fn ensure_output_parent(&self) -> CoreResult<()> {
        match self.output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| {
                    CoreError::PathError(format!(
                        "Failed to create output directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })
            }
            _ => Ok(()),
        }
    }
}

impl CommandJob for CompressJob {
    fn invocation_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(self.profile_args.len() + 4);
        args.push("-y".into());
        args.push("-i".into());
        args.push(self.input_path.clone().into_os_string());
        args.extend(self.profile_args.iter().map(OsString::from));
        args.push(self.output_path.clone().into_os_string());
        args
    }
}

/// Turns discovered files into jobs, numbered in discovery order.
pub fn build_jobs(
    videos: Vec<VideoFile>,
    output_root: &Path,
    profile: &CompressionProfile,
) -> Vec<CompressJob> {
    videos
        .into_iter()
        .enumerate()
        .map(|(id, video)| CompressJob::from_video(id, video, output_root, profile))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(root: &str, rel: &str) -> VideoFile {
        VideoFile {
            absolute_path: Path::new(root).join(rel),
            relative_path: PathBuf::from(rel),
        }
    }

    #[test]
    fn test_output_path_mirrors_relative_path() {
        let job = CompressJob::from_video(
            0,
            video("/in", "season1/ep1.mkv"),
            Path::new("/out"),
            &CompressionProfile::default(),
        );
        assert_eq!(job.input_path, PathBuf::from("/in/season1/ep1.mkv"));
        assert_eq!(job.output_path, PathBuf::from("/out/season1/ep1.mkv"));
        assert_eq!(job.relative_path, PathBuf::from("season1/ep1.mkv"));
    }

    #[test]
    fn test_compress_job_command() {
        let job = CompressJob::from_video(
            3,
            video("/in", "a.mp4"),
            Path::new("/out"),
            &CompressionProfile::default(),
        );
        let cmd = job.get_command(Path::new("/usr/local/bin/ffmpeg"));
        assert_eq!(cmd.get_program(), "/usr/local/bin/ffmpeg");

        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            [
                "-y", "-i", "/in/a.mp4", "-vf", "scale=1280:720", "-b:v", "1167824", "-b:a",
                "48023", "-r", "25", "-c:v", "libx264", "-preset", "fast", "-c:a", "aac",
                "-q:a", "2", "/out/a.mp4",
            ]
        );
    }

    #[test]
    fn test_build_jobs_assigns_sequential_ids() {
        let jobs = build_jobs(
            vec![video("/in", "a.mp4"), video("/in", "b.mov")],
            Path::new("/out"),
            &CompressionProfile::default(),
        );
        let ids: Vec<_> = jobs.iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_ensure_output_parent_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let job = CompressJob::from_video(
            0,
            video("/in", "nested/deeper/c.avi"),
            dir.path(),
            &CompressionProfile::default(),
        );
        job.ensure_output_parent().unwrap();
        job.ensure_output_parent().unwrap();
        assert!(dir.path().join("nested/deeper").is_dir());
    }
}
