//! Scaffolding pipeline
//!
//! A fixed, linear state machine:
//!
//! ```text
//! PackageManagerInit -> ManifestMutation -> DependencyInstall
//!     -> DirectoryCreation -> FileWriting -> GitInit -> Succeeded
//! ```
//!
//! Any step error moves the machine to the terminal `Failed` state and the
//! remaining steps never run. Completed steps are neither retried nor rolled
//! back, so a failed run can leave a partially scaffolded directory behind.

use crate::config::ScaffoldConfig;
use crate::error::{Error, Result};
use crate::logging;
use crate::manifest;
use crate::product::ProductConfig;
use crate::runtime::{ProcessRunner, ShellRunner, VersionResolver};
use crate::templates;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One unit of the scaffolding sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    PackageManagerInit,
    ManifestMutation,
    DependencyInstall,
    DirectoryCreation,
    FileWriting,
    GitInit,
}

impl Step {
    /// Every step, in execution order
    pub const ALL: [Step; 6] = [
        Step::PackageManagerInit,
        Step::ManifestMutation,
        Step::DependencyInstall,
        Step::DirectoryCreation,
        Step::FileWriting,
        Step::GitInit,
    ];

    pub fn first() -> Step {
        Step::ALL[0]
    }

    pub fn next(self) -> Option<Step> {
        let idx = Step::ALL.iter().position(|s| *s == self)?;
        Step::ALL.get(idx + 1).copied()
    }

    /// Progress line printed when the step starts
    pub fn label(self) -> &'static str {
        match self {
            Step::PackageManagerInit => "Initializing package manager...",
            Step::ManifestMutation => "Updating package.json...",
            Step::DependencyInstall => "Installing dependencies...",
            Step::DirectoryCreation => "Creating file structure...",
            Step::FileWriting => "Creating files...",
            Step::GitInit => "Initializing git...",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::PackageManagerInit => "package manager init",
            Step::ManifestMutation => "manifest update",
            Step::DependencyInstall => "dependency install",
            Step::DirectoryCreation => "directory creation",
            Step::FileWriting => "file writing",
            Step::GitInit => "git init",
        };
        write!(f, "{}", name)
    }
}

/// Machine state between steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Running(Step),
    Succeeded,
    Failed(Step),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PipelineState::Running(_))
    }
}

/// State after `step` finished with `result`
pub fn transition<T>(step: Step, result: &Result<T>) -> PipelineState {
    match (result, step.next()) {
        (Err(_), _) => PipelineState::Failed(step),
        (Ok(_), Some(next)) => PipelineState::Running(next),
        (Ok(_), None) => PipelineState::Succeeded,
    }
}

/// The error that ended a run, tagged with the step that raised it
#[derive(Debug, thiserror::Error)]
#[error("{step} failed: {source}")]
pub struct StepFailure {
    pub step: Step,
    #[source]
    pub source: Error,
}

/// How a run ended
#[derive(Debug)]
pub enum PipelineOutcome {
    Succeeded {
        elapsed: Duration,
        completed: Vec<Step>,
    },
    Failed {
        failure: StepFailure,
        completed: Vec<Step>,
    },
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Succeeded { .. })
    }

    /// Steps that ran to completion, in order
    pub fn completed(&self) -> &[Step] {
        match self {
            PipelineOutcome::Succeeded { completed, .. } => completed,
            PipelineOutcome::Failed { completed, .. } => completed,
        }
    }

    pub fn into_result(self) -> std::result::Result<Duration, StepFailure> {
        match self {
            PipelineOutcome::Succeeded { elapsed, .. } => Ok(elapsed),
            PipelineOutcome::Failed { failure, .. } => Err(failure),
        }
    }
}

/// Git commands issued by [`Step::GitInit`], in order
pub fn git_commands(commit_message: &str) -> [String; 3] {
    [
        "git init".to_string(),
        "git add .".to_string(),
        format!("git commit -m \"{}\"", commit_message),
    ]
}

/// Runs the scaffolding steps for one project
pub struct Pipeline<C: ProductConfig> {
    product: C,
    config: ScaffoldConfig,
    runner: Arc<dyn ProcessRunner>,
}

impl<C: ProductConfig> Pipeline<C> {
    pub fn new(product: C, config: ScaffoldConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            product,
            config,
            runner,
        }
    }

    /// Pipeline backed by the platform shell, honoring the configured timeout
    pub fn with_shell(product: C, config: ScaffoldConfig) -> Self {
        let runner = Arc::new(ShellRunner::new(config.command_timeout));
        Self::new(product, config, runner)
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    /// Run every step in order, stopping at the first failure.
    pub async fn run(&self) -> PipelineOutcome {
        let start = Instant::now();
        let mut completed = Vec::with_capacity(Step::ALL.len());
        let mut state = PipelineState::Running(Step::first());

        while let PipelineState::Running(step) = state {
            logging::info(step.label());
            let result = self.execute(step).await;
            state = transition(step, &result);

            match result {
                Ok(()) => completed.push(step),
                Err(source) => {
                    let failure = StepFailure { step, source };
                    logging::error(&failure);
                    return PipelineOutcome::Failed { failure, completed };
                }
            }
        }

        let elapsed = start.elapsed();
        logging::success("Done!");
        logging::success(format!("{:.2} seconds", elapsed.as_secs_f64()));
        PipelineOutcome::Succeeded { elapsed, completed }
    }

    async fn execute(&self, step: Step) -> Result<()> {
        let root = self.config.output_dir.as_path();
        match step {
            Step::PackageManagerInit => {
                self.runner.run(self.product.init_command(), root).await?;
            }
            Step::ManifestMutation => {
                let resolver = VersionResolver::new(
                    self.runner.clone(),
                    root,
                    self.product.version_query_template(),
                );
                manifest::mutate(
                    &self.config.manifest_path(),
                    &self.config.identity,
                    &resolver,
                )
                .await?;
            }
            Step::DependencyInstall => {
                self.runner.run(self.product.install_command(), root).await?;
            }
            Step::DirectoryCreation => {
                templates::create_directories(root, templates::directories()).await?;
            }
            Step::FileWriting => {
                let files = templates::files(&self.config.identity.name);
                templates::write_files(root, &files).await?;
            }
            Step::GitInit => {
                for command in git_commands(self.product.commit_message()) {
                    self.runner.run(&command, root).await?;
                }
            }
        }
        Ok(())
    }
}
