//! package.json mutation
//!
//! The package manager's initializer leaves a bare `package.json` behind. This
//! module rewrites it in one pass: identity fields, the script table, and the
//! dependency maps, whose versions are fetched concurrently from the registry.
//!
//! The write is all-or-nothing. Every version lookup is collected into a
//! results arena first; only when all of them succeeded is the manifest
//! serialized and written. A single failed lookup leaves the file untouched.

use crate::config::Identity;
use crate::error::{Error, Result};
use crate::runtime::VersionResolver;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::task::{Id, JoinSet};

/// File name of the manifest inside the output directory
pub const MANIFEST_FILE: &str = "package.json";

/// HTML entry point the bundler scripts are pointed at
pub const ENTRY_POINT: &str = "src/index.html";

pub const PROJECT_VERSION: &str = "0.0.1";
pub const PROJECT_LICENSE: &str = "ISC";

pub const RUNTIME_DEPENDENCIES: &[&str] = &["parcel", "react", "react-dom"];

pub const DEV_DEPENDENCIES: &[&str] = &[
    "typescript",
    "@types/react",
    "@types/react-dom",
    "parcel-plugin-static-files-copy",
];

/// The package descriptor, in the field order it is written back in
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Manifest {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub license: String,
    pub scripts: IndexMap<String, String>,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| Error::ManifestParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Self::parse(&content).map_err(|reason| Error::ManifestParse {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse manifest text. The top level must be a JSON object.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let value: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
        if !value.is_object() {
            return Err("expected a JSON object at the top level".to_string());
        }
        serde_json::from_value(value).map_err(|e| e.to_string())
    }

    /// Pretty JSON with a trailing newline. Field order is fixed by the struct
    /// and both dependency maps are sorted, so equal manifests always
    /// serialize to the same bytes.
    pub fn to_json(&self) -> String {
        // Serializing plain strings and maps of strings cannot fail.
        let mut json = serde_json::to_string_pretty(self).unwrap_or_default();
        json.push('\n');
        json
    }

    /// Write to a sibling temp file, then rename over `path`.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let tmp = temp_path(path);
        fs::write(&tmp, self.to_json())
            .await
            .map_err(|e| Error::filesystem(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(Error::filesystem(path, e));
        }
        Ok(())
    }

    pub fn apply_identity(&mut self, identity: &Identity) {
        self.name = identity.name.clone();
        self.description = identity.description.clone();
        self.author = identity.author.clone();
        self.version = PROJECT_VERSION.to_string();
        self.license = PROJECT_LICENSE.to_string();
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| MANIFEST_FILE.into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// The four scripts every generated project ships with, in this order
pub fn canonical_scripts(entry_point: &str) -> IndexMap<String, String> {
    let mut scripts = IndexMap::new();
    scripts.insert("start".to_string(), format!("parcel {} -p 3000", entry_point));
    scripts.insert(
        "build".to_string(),
        format!(
            "npm run check && parcel build {} --dist-dir build",
            entry_point
        ),
    );
    scripts.insert("serve".to_string(), "serve -s build".to_string());
    scripts.insert("check".to_string(), "tsc --noEmit".to_string());
    scripts
}

/// Which dependency map a package belongs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Runtime,
    Dev,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Runtime => write!(f, "dependency"),
            DependencyKind::Dev => write!(f, "devDependency"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRequest {
    pub package: String,
    pub kind: DependencyKind,
}

impl DependencyRequest {
    pub fn new(package: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            package: package.into(),
            kind,
        }
    }
}

/// Every package the generated project depends on
pub fn dependency_requests() -> Vec<DependencyRequest> {
    RUNTIME_DEPENDENCIES
        .iter()
        .map(|p| DependencyRequest::new(*p, DependencyKind::Runtime))
        .chain(
            DEV_DEPENDENCIES
                .iter()
                .map(|p| DependencyRequest::new(*p, DependencyKind::Dev)),
        )
        .collect()
}

/// Fully resolved dependency maps, ready to be placed in a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedVersions {
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
}

/// Resolve every request concurrently, one task per package, and wait for
/// all of them before looking at any result.
pub async fn resolve_versions(
    resolver: &VersionResolver,
    requests: &[DependencyRequest],
) -> Result<ResolvedVersions> {
    let mut tasks = JoinSet::new();
    let mut pending: HashMap<Id, DependencyRequest> = HashMap::with_capacity(requests.len());
    for request in requests {
        let resolver = resolver.clone();
        let package = request.package.clone();
        let handle = tasks.spawn(async move { resolver.latest_version(&package).await });
        pending.insert(handle.id(), request.clone());
    }

    let mut outcomes = Vec::with_capacity(requests.len());
    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((id, outcome)) => {
                if let Some(request) = pending.remove(&id) {
                    outcomes.push((request, outcome));
                }
            }
            Err(e) => {
                if let Some(request) = pending.remove(&e.id()) {
                    let cause = Error::TaskAborted {
                        reason: e.to_string(),
                    };
                    let failure = Error::resolution(&request.package, cause);
                    outcomes.push((request, Err(failure)));
                }
            }
        }
    }

    merge_outcomes(outcomes)
}

/// Fold a results arena into version maps, or report every failure.
///
/// Outcomes may arrive in any order; the maps are keyed by package name, so
/// the merged content only depends on which (package, version) pairs succeeded.
pub fn merge_outcomes(
    outcomes: Vec<(DependencyRequest, Result<String>)>,
) -> Result<ResolvedVersions> {
    let mut resolved = ResolvedVersions::default();
    let mut failures = Vec::new();

    for (request, outcome) in outcomes {
        match outcome {
            Ok(version) => {
                let map = match request.kind {
                    DependencyKind::Runtime => &mut resolved.dependencies,
                    DependencyKind::Dev => &mut resolved.dev_dependencies,
                };
                map.insert(request.package, version);
            }
            Err(e) => failures.push((request.package, e)),
        }
    }

    if !failures.is_empty() {
        failures.sort_by(|a, b| a.0.cmp(&b.0));
        return Err(Error::DependencyResolution {
            failures: failures.into_iter().map(|(_, e)| e).collect(),
        });
    }

    Ok(resolved)
}

/// Rewrite the manifest at `path` for a freshly scaffolded project.
///
/// Nothing is written unless every dependency version resolved.
pub async fn mutate(
    path: &Path,
    identity: &Identity,
    resolver: &VersionResolver,
) -> Result<Manifest> {
    let mut manifest = Manifest::load(path).await?;

    manifest.apply_identity(identity);
    manifest.scripts = canonical_scripts(ENTRY_POINT);

    let resolved = resolve_versions(resolver, &dependency_requests()).await?;
    manifest.dependencies = resolved.dependencies;
    manifest.dev_dependencies = resolved.dev_dependencies;

    manifest.save(path).await?;
    Ok(manifest)
}
