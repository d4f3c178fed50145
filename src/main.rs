// ABOUTME: Entry point for the pullwatch CLI application.
// ABOUTME: Parses arguments, loads config, and runs the presentation loop.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use pullwatch::config::{self, Config};
use pullwatch::engine::DockerEngine;
use pullwatch::error::{Error, Result};
use pullwatch::output::{Output, OutputMode};
use pullwatch::presentation::PresentationLoop;
use pullwatch::session::{SessionController, SessionState};
use std::env;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = env::current_dir()?;
    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Init { force } => {
            config::init_config(&cwd, force)?;
            Output::new(mode).success(&format!("Wrote {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Shell => {
            let config = load_config(cli.config.as_deref(), &cwd)?;
            let mut ui = PresentationLoop::new(controller(&config)?, Output::new(mode));
            ui.run(BufReader::new(tokio::io::stdin())).await
        }
        Commands::Pull {
            image,
            registry,
            arch,
        } => {
            let config = load_config(cli.config.as_deref(), &cwd)?;
            let controller = controller(&config)?;

            let mut inputs = controller.form().clone().with_image(image);
            if let Some(registry) = registry {
                inputs.registry = registry;
            }
            if let Some(arch) = arch {
                inputs.architecture = arch;
            }

            let mut ui = PresentationLoop::new(controller, Output::new(mode));
            match ui.run_once(inputs).await? {
                SessionState::Failed => {
                    let message = ui
                        .controller()
                        .session()
                        .log()
                        .last()
                        .map(|line| line.strip_prefix("error: ").unwrap_or(line).to_string())
                        .unwrap_or_default();
                    Err(Error::PullFailed(message))
                }
                _ => Ok(()),
            }
        }
    }
}

fn load_config(path: Option<&std::path::Path>, cwd: &std::path::Path) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::discover(cwd)?,
    };
    config.with_env_overrides()
}

fn controller(config: &Config) -> Result<SessionController> {
    let engine = DockerEngine::connect(&config.engine)?;
    Ok(
        SessionController::new(Arc::new(engine), config.pull_defaults())
            .with_relay_capacity(config.relay_capacity),
    )
}
