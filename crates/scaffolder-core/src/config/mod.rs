//! Run configuration for a single scaffolding pass
//!
//! Everything a pipeline step needs to know about the user's answers lives in
//! [`ScaffoldConfig`], which is handed to the orchestrator once and threaded
//! into each step from there.

use crate::error::{Error, Result};
use crate::runtime::DEFAULT_COMMAND_TIMEOUT;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Identity fields written into the generated manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub description: String,
    pub author: String,
}

impl Identity {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            author: author.into(),
        }
    }
}

/// Inputs for one scaffolding run
#[derive(Debug, Clone)]
pub struct ScaffoldConfig {
    /// Existing directory the project is generated into
    pub output_dir: PathBuf,
    pub identity: Identity,
    /// Budget for each external command
    pub command_timeout: Duration,
}

impl ScaffoldConfig {
    pub fn new(output_dir: impl Into<PathBuf>, identity: Identity) -> Self {
        Self {
            output_dir: output_dir.into(),
            identity,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Path of the package manifest inside the output directory
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(crate::manifest::MANIFEST_FILE)
    }

    /// Check the answers before any step runs.
    pub fn validate(&self) -> Result<()> {
        validate_output_dir(&self.output_dir)?;
        require_non_empty("name", &self.identity.name)?;
        require_non_empty("description", &self.identity.description)?;
        require_non_empty("author", &self.identity.author)?;
        if self.command_timeout.is_zero() {
            return Err(Error::InvalidInput {
                field: "timeout",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// The output directory must already exist.
pub fn validate_output_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidInput {
            field: "output directory",
            reason: "Input cannot be empty.".to_string(),
        });
    }
    if !path.is_dir() {
        return Err(Error::InvalidInput {
            field: "output directory",
            reason: format!("Directory does not exist: {}", path.display()),
        });
    }
    Ok(())
}

pub fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput {
            field,
            reason: "Input cannot be empty.".to_string(),
        });
    }
    Ok(())
}
