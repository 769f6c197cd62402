use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::error::Error;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn batchpress_cmd() -> Command {
    let mut cmd = Command::cargo_bin("batchpress").expect("Failed to find batchpress binary");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG").env_remove("BATCHPRESS_FFMPEG");
    cmd
}

fn touch(root: &Path, relative: &str) -> Result<(), Box<dyn Error>> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, relative)?;
    Ok(())
}

#[test]
fn test_non_existent_input_is_fatal() -> Result<(), Box<dyn Error>> {
    let temp = tempdir()?;
    let missing = temp.path().join("does-not-exist");

    batchpress_cmd()
        .arg("compress")
        .arg("-i")
        .arg(&missing)
        .arg("-o")
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Input directory not found"));

    assert!(!temp.path().join("out").exists());
    Ok(())
}

#[test]
fn test_empty_input_is_nothing_to_do() -> Result<(), Box<dyn Error>> {
    let input = tempdir()?;
    let output = tempdir()?;
    touch(input.path(), "notes/readme.txt")?;

    batchpress_cmd()
        .arg("compress")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(output.path().join("compressed"))
        .assert()
        .success()
        .stderr(contains("No video files found"));

    // Output root is created up front even when there is nothing to do.
    assert!(output.path().join("compressed").is_dir());
    Ok(())
}

#[test]
fn test_unlaunchable_ffmpeg_fails_every_file() -> Result<(), Box<dyn Error>> {
    let input = tempdir()?;
    let output = tempdir()?;
    touch(input.path(), "a.mp4")?;
    touch(input.path(), "nested/b.MKV")?;

    batchpress_cmd()
        .arg("compress")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .arg("--ffmpeg")
        .arg(input.path().join("no-such-ffmpeg"))
        .arg("--no-progress")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Total videos processed: 2"))
        .stderr(contains("Successfully compressed: 0"))
        .stderr(contains("Failed to compress: 2"));

    Ok(())
}

#[test]
fn test_zero_jobs_rejected() -> Result<(), Box<dyn Error>> {
    let input = tempdir()?;

    batchpress_cmd()
        .arg("compress")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(input.path().join("out"))
        .arg("--jobs")
        .arg("0")
        .assert()
        .failure();

    Ok(())
}

#[test]
fn test_same_input_and_output_rejected() -> Result<(), Box<dyn Error>> {
    let input = tempdir()?;

    batchpress_cmd()
        .arg("compress")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(input.path())
        .assert()
        .failure()
        .stderr(contains("Invalid configuration"));

    Ok(())
}

#[test]
fn test_aliased_output_root_rejected() -> Result<(), Box<dyn Error>> {
    let temp = tempdir()?;
    let videos = temp.path().join("videos");
    touch(&videos, "a.mp4")?;

    batchpress_cmd()
        .arg("compress")
        .arg("-i")
        .arg(&videos)
        .arg("-o")
        .arg(videos.join("sub").join(".."))
        .arg("--ffmpeg")
        .arg(videos.join("no-such-ffmpeg"))
        .assert()
        .failure()
        .code(1)
        .stderr(contains("is the input directory"));

    assert_eq!(fs::read_to_string(videos.join("a.mp4"))?, "a.mp4");
    Ok(())
}

#[test]
fn test_output_inside_input_rejected() -> Result<(), Box<dyn Error>> {
    let input = tempdir()?;
    touch(input.path(), "a.mp4")?;

    batchpress_cmd()
        .arg("compress")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(input.path().join("compressed"))
        .assert()
        .failure()
        .stderr(contains("inside the input directory"));

    assert!(!input.path().join("compressed").exists());
    Ok(())
}

#[test]
fn test_log_dir_receives_run_log() -> Result<(), Box<dyn Error>> {
    let input = tempdir()?;
    let output = tempdir()?;
    let logs = tempdir()?;

    batchpress_cmd()
        .arg("compress")
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .arg("--log-dir")
        .arg(logs.path())
        .assert()
        .success();

    let log_files: Vec<_> = fs::read_dir(logs.path())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("batchpress_run_") && name.ends_with(".log"))
        .collect();
    assert_eq!(log_files.len(), 1);

    let contents = fs::read_to_string(logs.path().join(&log_files[0]))?;
    assert!(contents.contains("No video files found"));
    Ok(())
}

#[cfg(unix)]
mod with_fake_ffmpeg {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use std::sync::OnceLock;

    // Copies the input (third argument) to the output (last argument).
    const COPY_TOOL: &str = r#"#!/bin/sh
for last; do :; done
cp "$3" "$last"
"#;

    // Written once, before any test in this binary spawns the script.
    fn copy_tool() -> &'static PathBuf {
        static TOOL: OnceLock<PathBuf> = OnceLock::new();
        TOOL.get_or_init(|| {
            let dir = std::env::temp_dir().join(format!("batchpress-cli-tools-{}", std::process::id()));
            fs::create_dir_all(&dir).expect("Failed to create tool dir");
            let path = dir.join("copy-ffmpeg");
            fs::write(&path, COPY_TOOL).expect("Failed to write script");
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("Failed to chmod script");
            path
        })
    }

    #[test]
    fn test_compress_mirrors_tree() -> Result<(), Box<dyn Error>> {
        let tool = copy_tool();
        let input = tempdir()?;
        let output = tempdir()?;
        touch(input.path(), "a.mp4")?;
        touch(input.path(), "season1/ep1.mkv")?;
        touch(input.path(), "season1/deep/ep2.AVI")?;
        touch(input.path(), "season1/cover.jpg")?;

        batchpress_cmd()
            .arg("compress")
            .arg("-i")
            .arg(input.path())
            .arg("-o")
            .arg(output.path())
            .arg("--ffmpeg")
            .arg(tool)
            .arg("-j")
            .arg("2")
            .arg("--no-progress")
            .assert()
            .success()
            .stderr(contains("Successfully compressed: 3"))
            .stderr(contains("Progress: 3/3 videos processed"));

        assert_eq!(fs::read_to_string(output.path().join("a.mp4"))?, "a.mp4");
        assert!(output.path().join("season1/ep1.mkv").is_file());
        assert!(output.path().join("season1/deep/ep2.AVI").is_file());
        assert!(!output.path().join("season1/cover.jpg").exists());
        Ok(())
    }

    #[test]
    fn test_json_mode_emits_events_on_stdout() -> Result<(), Box<dyn Error>> {
        let tool = copy_tool();
        let input = tempdir()?;
        let output = tempdir()?;
        touch(input.path(), "clip.mov")?;

        batchpress_cmd()
            .arg("compress")
            .arg("-i")
            .arg(input.path())
            .arg("-o")
            .arg(output.path())
            .arg("--ffmpeg")
            .arg(tool)
            .arg("--json")
            .assert()
            .success()
            .stdout(contains(r#""type":"batch_started""#))
            .stdout(contains(r#""type":"job_completed""#))
            .stdout(contains(r#""type":"batch_complete""#))
            .stdout(contains("Compression Summary").not());

        Ok(())
    }
}
