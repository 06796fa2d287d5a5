//! Charm-style CLI prompts using cliclack

use crate::config::{Identity, ScaffoldConfig};
use crate::pipeline::{Pipeline, StepFailure};
use crate::product::ProductConfig;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

const EMPTY_INPUT: &str = "Input cannot be empty.";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Existing directory to generate the project into
    pub directory: Option<PathBuf>,

    /// Application name
    pub name: Option<String>,

    /// Application description
    pub description: Option<String>,

    /// Author name
    pub author: Option<String>,

    /// Timeout for each external command
    pub timeout: Option<Duration>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
///
/// Every error is printed once before it is returned, so callers only need
/// to turn it into an exit status. Unless `--yes` was given, the terminal is
/// held open until Enter on every exit path.
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    let result = scaffold(config, &args).await;

    if let Err(e) = &result {
        if !reported_by_pipeline(e) {
            let _ = cliclack::log::error(e);
        }
    }

    finish(result, args.yes, wait_for_enter)
}

async fn scaffold<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Collect answers (flags first, prompt for the rest)
    let output_dir = select_directory(args)?;
    let name = prompt_text("Enter the application's name", args.name.as_deref())?;
    let description = prompt_text(
        "Enter the application's description",
        args.description.as_deref(),
    )?;
    let author = prompt_text("Enter the author's name", args.author.as_deref())?;

    let mut scaffold = ScaffoldConfig::new(output_dir, Identity::new(name, description, author));
    if let Some(timeout) = args.timeout {
        scaffold = scaffold.with_command_timeout(timeout);
    }
    scaffold.validate()?;

    // Step 2: Run the pipeline
    let pipeline = Pipeline::with_shell(config.clone(), scaffold);
    let outcome = pipeline.run().await;

    // Step 3: Report
    match outcome.into_result() {
        Ok(_) => print_next_steps(config, &pipeline.config().output_dir),
        Err(failure) => Err(failure.into()),
    }
}

/// The orchestrator logs the step failure that ends a run itself.
fn reported_by_pipeline(error: &anyhow::Error) -> bool {
    error.downcast_ref::<StepFailure>().is_some()
}

/// Wait for acknowledgement unless `yes`, then hand back the scaffold result.
fn finish<F>(result: Result<()>, yes: bool, wait: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    if yes {
        return result;
    }
    let waited = wait();
    result.and(waited)
}

fn select_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Use --directory flag if provided
    let path = if let Some(dir) = &args.directory {
        let p = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else {
        let input: String = cliclack::input("Enter the output directory")
            .placeholder(".")
            .validate(|input: &String| {
                if input.trim().is_empty() {
                    Err(EMPTY_INPUT)
                } else if !Path::new(input.trim()).is_dir() {
                    Err("Directory does not exist.")
                } else {
                    Ok(())
                }
            })
            .interact()?;

        let p = PathBuf::from(input.trim());
        if p.is_absolute() {
            p
        } else {
            current_dir.join(p)
        }
    };

    if !path.is_dir() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }

    // Warn if directory has files
    if let Ok(entries) = std::fs::read_dir(&path) {
        let count = entries.count();
        if count > 0 {
            cliclack::log::warning(format!("Directory has {} existing items", count))?;

            // Auto-confirm with --yes flag
            let confirm = if args.yes {
                true
            } else {
                cliclack::confirm("Continue anyway?")
                    .initial_value(true)
                    .interact()?
            };

            if !confirm {
                anyhow::bail!("Setup cancelled.");
            }
        }
    }

    Ok(path)
}

fn prompt_text(prompt: &str, provided: Option<&str>) -> Result<String> {
    if let Some(value) = provided {
        return Ok(value.trim().to_string());
    }

    let input: String = cliclack::input(prompt)
        .validate(|input: &String| {
            if input.trim().is_empty() {
                Err(EMPTY_INPUT)
            } else {
                Ok(())
            }
        })
        .interact()?;

    Ok(input.trim().to_string())
}

fn print_next_steps<C: ProductConfig>(config: &C, project_dir: &Path) -> Result<()> {
    let steps = config.next_steps(project_dir);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

fn wait_for_enter() -> Result<()> {
    println!();
    println!("Press Enter to exit");
    console::Term::stdout().read_line()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::pipeline::Step;
    use std::cell::Cell;

    #[test]
    fn test_finish_waits_after_early_error() {
        let waits = Cell::new(0);
        let result = finish(Err(anyhow::anyhow!("Setup cancelled.")), false, || {
            waits.set(waits.get() + 1);
            Ok(())
        });

        assert_eq!(waits.get(), 1);
        assert_eq!(result.unwrap_err().to_string(), "Setup cancelled.");
    }

    #[test]
    fn test_finish_waits_after_success() {
        let waits = Cell::new(0);
        let result = finish(Ok(()), false, || {
            waits.set(waits.get() + 1);
            Ok(())
        });

        assert_eq!(waits.get(), 1);
        assert!(result.is_ok());
    }

    #[test]
    fn test_finish_skips_wait_with_yes() {
        let waits = Cell::new(0);
        let result = finish(Err(anyhow::anyhow!("boom")), true, || {
            waits.set(waits.get() + 1);
            Ok(())
        });

        assert_eq!(waits.get(), 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_finish_keeps_scaffold_error_over_wait_error() {
        let result = finish(Err(anyhow::anyhow!("scaffold")), false, || {
            Err(anyhow::anyhow!("stdin closed"))
        });
        assert_eq!(result.unwrap_err().to_string(), "scaffold");
    }

    #[test]
    fn test_only_step_failures_count_as_already_reported() {
        let failure = StepFailure {
            step: Step::DependencyInstall,
            source: Error::ProcessFailure {
                command: "yarn".to_string(),
                exit_code: Some(1),
                output: "offline".to_string(),
            },
        };
        assert!(reported_by_pipeline(&failure.into()));

        let invalid = Error::InvalidInput {
            field: "name",
            reason: "Input cannot be empty.".to_string(),
        };
        assert!(!reported_by_pipeline(&invalid.into()));
        assert!(!reported_by_pipeline(&anyhow::anyhow!("Setup cancelled.")));
    }
}
