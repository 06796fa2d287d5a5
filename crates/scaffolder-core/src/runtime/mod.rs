//! External process execution and registry lookups
//!
//! This module provides:
//! - A process runner abstraction over shell commands with per-call timeouts
//! - A version resolver that queries the package registry through it

pub mod process;
pub mod resolver;

pub use process::{ProcessRunner, ShellRunner, DEFAULT_COMMAND_TIMEOUT};
pub use resolver::VersionResolver;
