//! Interactive front end: cliclack prompts that collect the project answers
//! and drive the pipeline.
//!
//! Only compiled with the `tui` feature.

#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use prompts::{run, CreateArgs};
