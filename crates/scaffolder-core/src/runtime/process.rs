//! External process execution
//!
//! All external commands the pipeline issues (package manager, registry
//! queries, git) go through a [`ProcessRunner`]. The shell-backed
//! implementation is [`ShellRunner`]; tests substitute a scripted runner.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Default budget for a single external command
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

/// Runs shell commands and returns their standard output
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `command` with `working_dir` as its current directory.
    ///
    /// Returns stdout verbatim. Fails if the process cannot be started, exits
    /// non-zero, or exceeds the runner's timeout.
    async fn run(&self, command: &str, working_dir: &Path) -> Result<String>;
}

/// Runs commands through the platform shell (`sh -c` / `cmd /C`)
#[derive(Debug, Clone)]
pub struct ShellRunner {
    timeout: Duration,
}

impl ShellRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `cmd` does its own quote parsing, so the command line is passed
    /// through unescaped there.
    #[cfg(windows)]
    fn shell_command(command: &str) -> TokioCommand {
        let mut cmd = TokioCommand::new("cmd");
        cmd.arg("/C").raw_arg(command);
        cmd
    }

    #[cfg(not(windows))]
    fn shell_command(command: &str) -> TokioCommand {
        let mut cmd = TokioCommand::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

#[async_trait]
impl ProcessRunner for ShellRunner {
    async fn run(&self, command: &str, working_dir: &Path) -> Result<String> {
        let child = Self::shell_command(command)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::ProcessFailure {
                command: command.to_string(),
                exit_code: None,
                output: e.to_string(),
            })?;

        // Dropping the future on timeout drops the child, which kills it.
        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(Error::ProcessFailure {
                    command: command.to_string(),
                    exit_code: None,
                    output: e.to_string(),
                });
            }
            Err(_) => {
                return Err(Error::Timeout {
                    command: command.to_string(),
                    timeout: self.timeout,
                });
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::ProcessFailure {
                command: command.to_string(),
                exit_code: output.status.code(),
                output: if stderr.is_empty() {
                    stdout.trim().to_string()
                } else {
                    stderr
                },
            });
        }

        Ok(stdout)
    }
}


#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_returns_stdout() {
        let dir = TempDir::new().unwrap();
        let runner = ShellRunner::default();

        let output = runner.run("echo 18.3.1", dir.path()).await.unwrap();
        assert_eq!(output, "18.3.1\n");
    }

    #[tokio::test]
    async fn test_run_uses_working_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "here").unwrap();
        let runner = ShellRunner::default();

        let output = runner.run("cat marker.txt", dir.path()).await.unwrap();
        assert_eq!(output, "here");
    }

    #[tokio::test]
    async fn test_run_reports_non_zero_exit() {
        let dir = TempDir::new().unwrap();
        let runner = ShellRunner::default();

        let err = runner
            .run("echo broken >&2; exit 3", dir.path())
            .await
            .unwrap_err();
        match err {
            Error::ProcessFailure {
                exit_code, output, ..
            } => {
                assert_eq!(exit_code, Some(3));
                assert_eq!(output, "broken");
            }
            other => panic!("Expected ProcessFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_falls_back_to_stdout_when_stderr_empty() {
        let dir = TempDir::new().unwrap();
        let runner = ShellRunner::default();

        let err = runner.run("echo nope; exit 1", dir.path()).await.unwrap_err();
        match err {
            Error::ProcessFailure { output, .. } => assert_eq!(output, "nope"),
            other => panic!("Expected ProcessFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_times_out() {
        let dir = TempDir::new().unwrap();
        let runner = ShellRunner::new(Duration::from_millis(200));

        let err = runner.run("sleep 5", dir.path()).await.unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
        assert!(err.to_string().ends_with("timed out after 200ms"));
    }

    #[tokio::test]
    async fn test_run_fails_in_missing_directory() {
        let dir = TempDir::new().unwrap();
        let runner = ShellRunner::default();

        let err = runner
            .run("echo hi", &dir.path().join("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProcessFailure { exit_code: None, .. }));
    }
}
