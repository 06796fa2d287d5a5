//! Error types for the scaffolding pipeline
//!
//! Every failure the core can produce is a variant of [`Error`]. The
//! orchestrator wraps whichever one ends a run together with the step that
//! produced it; nothing below the orchestrator recovers from an error.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for scaffolding operations
#[derive(Debug, Error)]
pub enum Error {
    /// An external command could not be started or exited unsuccessfully.
    #[error("Command `{command}` failed{}: {output}", exit_code.map(|c| format!(" with exit code {}", c)).unwrap_or_default())]
    ProcessFailure {
        command: String,
        /// `None` when the process never started or was killed by a signal
        exit_code: Option<i32>,
        /// Captured stderr, or stdout when stderr was empty
        output: String,
    },

    /// An external command did not finish within its time budget.
    #[error("Command `{command}` timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    /// A command succeeded but printed nothing where an answer was expected.
    #[error("`{command}` returned no output")]
    EmptyOutput { command: String },

    /// A background task panicked or was cancelled before reporting back.
    #[error("Task did not complete: {reason}")]
    TaskAborted { reason: String },

    /// The latest version of a single package could not be determined.
    #[error("Could not resolve latest version of '{package}': {cause}")]
    ResolutionFailure {
        package: String,
        #[source]
        cause: Box<Error>,
    },

    /// The precondition manifest is missing or is not valid JSON.
    #[error("Failed to read manifest at {path}: {reason}")]
    ManifestParse { path: PathBuf, reason: String },

    /// At least one dependency failed to resolve during the concurrent phase.
    #[error("Failed to resolve {} dependencies:\n{}", failures.len(), format_failures(failures))]
    DependencyResolution { failures: Vec<Error> },

    /// A directory or file could not be created or written.
    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A user-supplied value failed validation before the pipeline started.
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

fn format_failures(failures: &[Error]) -> String {
    failures
        .iter()
        .map(|f| format!("  - {}", f))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Error {
    pub(crate) fn resolution(package: impl Into<String>, cause: Error) -> Self {
        Error::ResolutionFailure {
            package: package.into(),
            cause: Box::new(cause),
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_process_failure_message_includes_exit_code() {
        let err = Error::ProcessFailure {
            command: "yarn".to_string(),
            exit_code: Some(2),
            output: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Command `yarn` failed with exit code 2: boom");
    }

    #[test]
    fn test_process_failure_message_without_exit_code() {
        let err = Error::ProcessFailure {
            command: "nope".to_string(),
            exit_code: None,
            output: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "Command `nope` failed: not found");
    }

    #[test]
    fn test_dependency_resolution_lists_every_failure() {
        let err = Error::DependencyResolution {
            failures: vec![
                Error::resolution(
                    "react",
                    Error::ProcessFailure {
                        command: "npm view react version".to_string(),
                        exit_code: Some(1),
                        output: "offline".to_string(),
                    },
                ),
                Error::resolution(
                    "parcel",
                    Error::EmptyOutput {
                        command: "npm view parcel version".to_string(),
                    },
                ),
            ],
        };
        let message = err.to_string();
        assert!(message.starts_with("Failed to resolve 2 dependencies:"));
        assert!(message.contains("  - Could not resolve latest version of 'react': Command"));
        assert!(message.contains("'parcel': `npm view parcel version` returned no output"));
    }

    #[test]
    fn test_timeout_message_keeps_sub_second_budget() {
        let err = Error::Timeout {
            command: "npm view react version".to_string(),
            timeout: Duration::from_millis(200),
        };
        assert_eq!(
            err.to_string(),
            "Command `npm view react version` timed out after 200ms"
        );
    }

    #[test]
    fn test_resolution_failure_exposes_cause() {
        let err = Error::resolution(
            "react",
            Error::Timeout {
                command: "npm view react version".to_string(),
                timeout: Duration::from_secs(300),
            },
        );
        let source = err.source().expect("cause is exposed as source");
        assert!(source.to_string().contains("timed out after 300s"));
        match err {
            Error::ResolutionFailure { cause, .. } => {
                assert!(matches!(*cause, Error::Timeout { .. }))
            }
            other => panic!("Expected ResolutionFailure, got {:?}", other),
        }
    }
}
