//! Latest-version lookup for npm packages

use crate::error::{Error, Result};
use crate::runtime::process::ProcessRunner;
use std::path::PathBuf;
use std::sync::Arc;

/// Placeholder substituted with the package name in a query template
pub const PACKAGE_PLACEHOLDER: &str = "{package}";

/// Asks the package registry for a package's latest published version
#[derive(Clone)]
pub struct VersionResolver {
    runner: Arc<dyn ProcessRunner>,
    working_dir: PathBuf,
    query_template: String,
}

impl VersionResolver {
    /// `query_template` is a shell command containing [`PACKAGE_PLACEHOLDER`],
    /// e.g. `npm view {package} version`.
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        working_dir: impl Into<PathBuf>,
        query_template: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            working_dir: working_dir.into(),
            query_template: query_template.into(),
        }
    }

    /// Build the query command for one package
    pub fn query_command(&self, package: &str) -> String {
        self.query_template.replace(PACKAGE_PLACEHOLDER, package)
    }

    /// Resolve the latest version of `package`.
    ///
    /// Empty output counts as a failure: a registry that answers with nothing
    /// has not told us a version.
    pub async fn latest_version(&self, package: &str) -> Result<String> {
        let command = self.query_command(package);
        let output = self
            .runner
            .run(&command, &self.working_dir)
            .await
            .map_err(|e| Error::resolution(package, e))?;

        let version = output.trim();
        if version.is_empty() {
            return Err(Error::resolution(package, Error::EmptyOutput { command }));
        }

        Ok(version.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::process::stub::ScriptedRunner;

    const TEMPLATE: &str = "npm view {package} version";

    #[test]
    fn test_query_command_substitutes_package() {
        let resolver = VersionResolver::new(Arc::new(ScriptedRunner::new()), ".", TEMPLATE);
        assert_eq!(
            resolver.query_command("@types/react"),
            "npm view @types/react version"
        );
    }

    #[tokio::test]
    async fn test_latest_version_trims_output() {
        let runner = ScriptedRunner::new().respond("npm view react version", "18.3.1\r\n");
        let resolver = VersionResolver::new(Arc::new(runner), ".", TEMPLATE);

        let version = resolver.latest_version("react").await.unwrap();
        assert_eq!(version, "18.3.1");
    }

    #[tokio::test]
    async fn test_latest_version_rejects_empty_output() {
        let runner = ScriptedRunner::new().respond("npm view react version", "\n");
        let resolver = VersionResolver::new(Arc::new(runner), ".", TEMPLATE);

        let err = resolver.latest_version("react").await.unwrap_err();
        match err {
            Error::ResolutionFailure { package, cause } => {
                assert_eq!(package, "react");
                assert!(matches!(*cause, Error::EmptyOutput { .. }));
            }
            other => panic!("Expected ResolutionFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_latest_version_wraps_process_failure() {
        let runner = ScriptedRunner::new().fail("npm view parcel version", "E404");
        let resolver = VersionResolver::new(Arc::new(runner), ".", TEMPLATE);

        let err = resolver.latest_version("parcel").await.unwrap_err();
        match err {
            Error::ResolutionFailure { package, cause } => {
                assert_eq!(package, "parcel");
                assert!(cause.to_string().contains("E404"));
                assert!(matches!(*cause, Error::ProcessFailure { .. }));
            }
            other => panic!("Expected ResolutionFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_latest_version_keeps_timeout_cause() {
        let runner = ScriptedRunner::new().time_out("npm view react version");
        let resolver = VersionResolver::new(Arc::new(runner), ".", TEMPLATE);

        let err = resolver.latest_version("react").await.unwrap_err();
        match err {
            Error::ResolutionFailure { cause, .. } => {
                assert!(matches!(*cause, Error::Timeout { .. }));
            }
            other => panic!("Expected ResolutionFailure, got {:?}", other),
        }
    }
}
