//! react-create - Project scaffolding for React + TypeScript single-page apps

use anyhow::Result;
use clap::{Parser, Subcommand};
use scaffolder_core::tui::CreateArgs;
use scaffolder_core::ProductConfig;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

/// react-create product configuration
#[derive(Clone)]
pub struct ReactConfig;

impl ProductConfig for ReactConfig {
    fn display_name(&self) -> &'static str {
        "Create React App"
    }

    fn init_command(&self) -> &'static str {
        "yarn init -y"
    }

    fn install_command(&self) -> &'static str {
        "yarn"
    }

    fn version_query_template(&self) -> &'static str {
        "npm view {package} version"
    }

    fn next_steps(&self, dir: &Path) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_ref() != Some(&dir.to_path_buf()) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Start dev server
        steps.push("yarn start".to_string());

        // Step 3: Production build
        steps.push("yarn build && yarn serve".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "react-create")]
#[command(about = "CLI for scaffolding React + TypeScript single-page apps")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new React project in an existing directory
    Create(CliCreateArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Existing directory to generate the project into
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Application name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Application description
    #[arg(long)]
    pub description: Option<String>,

    /// Author name
    #[arg(short, long)]
    pub author: Option<String>,

    /// Timeout in seconds for each external command (package manager, npm, git)
    #[arg(long, env = "REACT_CREATE_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Auto-confirm all prompts and exit without waiting for Enter
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            directory: args.directory,
            name: args.name,
            description: args.description,
            author: args.author,
            timeout: args.timeout.map(Duration::from_secs),
            yes: args.yes,
        }
    }
}

/// The scaffolder prints its own errors; only the status is left to report.
fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = ReactConfig;

    // No subcommand provided, default to create behavior (interactive mode)
    let create_args = match args.command {
        Some(Command::Create(create_args)) => create_args.into(),
        None => CreateArgs::default(),
    };

    let result = scaffolder_core::run(&config, create_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    ExitCode::from(exit_status(&result))
}
