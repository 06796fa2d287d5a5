//! Scaffolder Core - Shared library for web app scaffolding CLIs
//!
//! This library turns an existing, empty directory into a ready-to-build
//! single-page React + TypeScript project: package manifest, directory tree,
//! template sources, and a git repository with an initial commit.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Process runner, version resolver, manifest
//!   mutation, template materialization
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and the
//!   `Pipeline` state machine that sequences the operations
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{Identity, Pipeline, ScaffoldConfig};
//!
//! let config = ScaffoldConfig::new("./my-app", Identity::new("my-app", "Demo", "Me"));
//! config.validate()?;
//! let outcome = Pipeline::with_shell(MyConfig, config).run().await;
//! let elapsed = outcome.into_result()?;
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod pipeline;
pub mod product;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Identity, ScaffoldConfig};
pub use error::{Error, Result};
pub use manifest::Manifest;
pub use pipeline::{Pipeline, PipelineOutcome, Step, StepFailure};
pub use product::ProductConfig;
pub use runtime::{ProcessRunner, ShellRunner, VersionResolver};

#[cfg(feature = "tui")]
pub use tui::run;
