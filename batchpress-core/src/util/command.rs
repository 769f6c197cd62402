use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use log::{debug, error};

use crate::error::{CoreError, CoreResult};
use crate::utils::tail_lines;

/// Lines of tool stderr kept in a `ToolExecution` error.
pub const STDERR_TAIL_LINES: usize = 20;

/// Log a command being executed
pub fn log_command(cmd: &Command) {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|arg| arg.to_string_lossy()).collect();

    debug!("Executing command: {} {}", program, args.join(" "));
}

/// Runs a command to completion with stdout/stderr captured.
///
/// A spawn failure becomes `ToolLaunch`; a nonzero exit (or death by signal)
/// becomes `ToolExecution` carrying the tail of the tool's stderr. `input`
/// identifies the file being processed in that error.
pub fn run_command(cmd: &mut Command, input: &Path) -> CoreResult<Output> {
    log_command(cmd);

    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| {
            error!("Failed to launch {}: {}", cmd.get_program().to_string_lossy(), source);
            CoreError::ToolLaunch {
                tool: PathBuf::from(cmd.get_program()),
                source,
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CoreError::ToolExecution {
            input: input.to_path_buf(),
            code: output.status.code(),
            stderr: tail_lines(&stderr, STDERR_TAIL_LINES),
        });
    }

    Ok(output)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_success() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo hello"]);
        let output = run_command(&mut cmd, Path::new("in.mp4")).unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }

    #[test]
    fn test_run_command_nonzero_exit_captures_stderr() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo 'bad input' >&2; exit 3"]);
        match run_command(&mut cmd, Path::new("in.mp4")) {
            Err(CoreError::ToolExecution { input, code, stderr }) => {
                assert_eq!(input, PathBuf::from("in.mp4"));
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "bad input");
            }
            other => panic!("expected ToolExecution, got {other:?}"),
        }
    }

    #[test]
    fn test_run_command_missing_program() {
        let mut cmd = Command::new("/definitely/not/a/real/ffmpeg");
        match run_command(&mut cmd, Path::new("in.mp4")) {
            Err(CoreError::ToolLaunch { tool, .. }) => {
                assert_eq!(tool, PathBuf::from("/definitely/not/a/real/ffmpeg"));
            }
            other => panic!("expected ToolLaunch, got {other:?}"),
        }
    }
}
