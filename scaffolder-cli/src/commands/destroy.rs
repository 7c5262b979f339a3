//! `scaffolder destroy`

use anyhow::{Context, Result};
use clap::Subcommand;
use console::{style, Emoji};
use scaffolder::{DisplayMode, ProjectPaths, TaskRunner};
use scaffolder_cli_lib::{
    destroy_tasks, ComponentGenerator, Generator, GeneratorContext, PageGenerator,
    ServiceGenerator,
};

static BROOM: Emoji = Emoji("🧹 ", "");
static SUCCESS: Emoji = Emoji("✓", "√");

/// What to remove
#[derive(Debug, Subcommand)]
pub enum DestroyTarget {
    /// Remove a page and its route
    Page {
        /// Page name used when it was generated
        name: String,
    },
    /// Remove a component
    Component {
        /// Component name
        name: String,
    },
    /// Remove the service of a schema model
    Service {
        /// Model name, singular or plural
        name: String,
    },
}

impl DestroyTarget {
    fn generator(&self) -> Box<dyn Generator> {
        match self {
            Self::Page { name } => Box::new(PageGenerator::new(name, None)),
            Self::Component { name } => Box::new(ComponentGenerator::new(name)),
            Self::Service { name } => Box::new(ServiceGenerator::new(name)),
        }
    }
}

/// Remove previously generated files from the current project
pub struct DestroyCommand {
    target: DestroyTarget,
    verbose: bool,
}

impl DestroyCommand {
    /// Create a new destroy command
    pub const fn new(target: DestroyTarget, verbose: bool) -> Self {
        Self { target, verbose }
    }

    /// Execute the destroy command
    ///
    /// Files that no longer exist are skipped, so destroying twice is safe.
    ///
    /// # Errors
    ///
    /// Returns an error if the file list cannot be built or a deletion fails.
    pub fn execute(&self) -> Result<()> {
        let (paths, config) = ProjectPaths::resolve_or_exit();
        let base = paths.base.clone();
        let generator = self.target.generator();

        println!(
            "\n{}Destroying {}: {}",
            BROOM,
            generator.kind(),
            style(generator.name()).cyan().bold()
        );

        // Content is discarded, only the paths matter
        let ctx = GeneratorContext::from_config(paths, &config, false);
        let tasks = destroy_tasks(generator.as_ref(), &ctx)
            .with_context(|| format!("Failed to determine {} files", generator.kind()))?;

        let mode = if self.verbose {
            DisplayMode::Verbose
        } else {
            DisplayMode::Default
        };
        TaskRunner::new(&base, mode)
            .run(&tasks)
            .into_result()
            .context("Destroy stopped")?;

        println!();
        println!(
            "  {} Destroyed {} {}",
            SUCCESS,
            generator.kind(),
            style(generator.name()).green()
        );
        println!();

        Ok(())
    }
}
