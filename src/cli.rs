// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines the shell, one-shot pull, and init subcommands.

use clap::{Parser, Subcommand};
use pullwatch::types::Architecture;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pullwatch")]
#[command(about = "Pull container images and watch layer and overall progress")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Emit JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: pullwatch.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive shell (default)
    Shell,

    /// Pull one image and exit
    Pull {
        /// Image reference, e.g. alpine or ghcr.io/org/app:1.0
        image: String,

        /// Registry address (default from config)
        #[arg(short, long)]
        registry: Option<String>,

        /// Target architecture (default from config)
        #[arg(short, long, value_enum)]
        arch: Option<Architecture>,
    },

    /// Write a pullwatch.yml template to the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
