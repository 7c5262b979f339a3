//! scaffolder CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{DestroyCommand, DestroyTarget, GenerateCommand, GenerateTarget, InitCommand};

#[derive(Parser)]
#[command(name = "scaffolder")]
#[command(version)]
#[command(about = "Generate and destroy pages, components and services", long_about = None)]
struct Cli {
    /// Print every task and command output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create scaffolder.toml in the current directory
    Init {
        /// Replace an existing configuration
        #[arg(short, long)]
        force: bool,
    },
    /// Generate files
    #[command(alias = "g")]
    Generate {
        /// Overwrite existing files
        #[arg(short, long, global = true)]
        force: bool,

        #[command(subcommand)]
        target: GenerateTarget,
    },
    /// Remove generated files
    #[command(alias = "d")]
    Destroy {
        #[command(subcommand)]
        target: DestroyTarget,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    scaffolder::observability::init(cli.verbose);

    match cli.command {
        Commands::Init { force } => {
            InitCommand::new(force).execute()?;
        }
        Commands::Generate { force, target } => {
            GenerateCommand::new(target, force, cli.verbose).execute()?;
        }
        Commands::Destroy { target } => {
            DestroyCommand::new(target, cli.verbose).execute()?;
        }
    }

    Ok(())
}
