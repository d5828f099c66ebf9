use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

mod agent_config;
mod artifact_io;
mod collector;
mod error;
mod logging;
mod prompt_text;
mod settings;
mod sync;

use error::{Result, SyncError};
use logging::LogTarget;
use settings::{DEFAULT_SETTINGS_FILE, SyncSettings};
use sync::{Environment, SyncReport, run_sync};

#[derive(Debug, Parser)]
#[command(name = "prompt-sync")]
#[command(
    version,
    about = "Sync markdown agent prompts into per-environment JSON agent configs"
)]
struct Cli {
    /// Project root holding the prompts and configs directories
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Settings file, relative to the working directory (defaults to
    /// prompt-sync.toml under the root, if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Environment to sync; repeat to sync several. Overrides the settings file
    #[arg(long = "env", value_name = "NAME")]
    environments: Vec<String>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_target = if cli.json {
        LogTarget::Stderr
    } else {
        LogTarget::Stdout
    };
    if let Err(err) = logging::init(log_target) {
        eprintln!("Failed to initialize logging: {err}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().map_err(SyncError::WorkingDirectory)?;
    let root = match &cli.root {
        Some(root) => cwd.join(root),
        None => cwd.clone(),
    };

    let settings = match &cli.config {
        Some(path) => SyncSettings::load(&cwd.join(path), true)?,
        None => SyncSettings::load(&root.join(DEFAULT_SETTINGS_FILE), false)?,
    };
    let mut options = settings.into_options(&root);
    if !cli.environments.is_empty() {
        options.environments = cli.environments.into_iter().map(Environment::new).collect();
    }

    let report = run_sync(&options)?;
    if cli.json {
        print_json_report(&report)?;
    }
    Ok(())
}

fn print_json_report(report: &SyncReport) -> Result<()> {
    let text =
        artifact_io::to_indented_json(report).map_err(|err| SyncError::write("<stdout>", err))?;
    println!("{text}");
    Ok(())
}
