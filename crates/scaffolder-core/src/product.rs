//! Product configuration trait for CLI binaries
//!
//! The pipeline does not know which package manager or registry it talks to.
//! Each binary implements this trait to supply its product identity and the
//! command strings the pipeline issues.

use std::path::Path;

/// Configuration trait for scaffolding products
///
/// Each product implements this trait to define:
/// - Product display name
/// - Package manager commands (init, install)
/// - The registry query used to resolve latest versions
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Command that creates the bare package manifest
    fn init_command(&self) -> &'static str;

    /// Command that installs the dependencies listed in the manifest
    fn install_command(&self) -> &'static str;

    /// Registry query printing a package's latest version, with `{package}`
    /// where the package name goes
    fn version_query_template(&self) -> &'static str;

    /// Message of the first commit in the generated repository
    fn commit_message(&self) -> &'static str {
        "Initial commit"
    }

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path) -> Vec<String>;
}
