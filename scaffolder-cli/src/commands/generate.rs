//! `scaffolder generate`

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use console::{style, Emoji};
use scaffolder::process::run_commands;
use scaffolder::{DisplayMode, ProjectPaths, TaskRunner, WriteOptions};
use scaffolder_cli_lib::{
    generate_tasks, registers_new_routes, ComponentGenerator, Generator, GeneratorContext,
    PageGenerator, ServiceGenerator,
};

static PACKAGE: Emoji = Emoji("📦 ", "");
static SUCCESS: Emoji = Emoji("✓", "√");

/// What to generate
#[derive(Debug, Subcommand)]
pub enum GenerateTarget {
    /// Generate a page and register its route
    ///
    /// Examples:
    ///   scaffolder generate page About
    ///   scaffolder generate page Post '{id:Int}'
    ///   scaffolder generate page Home /
    Page {
        /// Page name (`About`, `user-profile`, ...)
        name: String,
        /// Route path, `/<name>` when omitted
        path: Option<String>,
    },
    /// Generate a reusable component
    Component {
        /// Component name
        name: String,
    },
    /// Generate a CRUD service for a schema model
    Service {
        /// Model name, singular or plural
        name: String,
    },
}

impl GenerateTarget {
    fn generator(&self) -> Box<dyn Generator> {
        match self {
            Self::Page { name, path } => Box::new(PageGenerator::new(name, path.as_deref())),
            Self::Component { name } => Box::new(ComponentGenerator::new(name)),
            Self::Service { name } => Box::new(ServiceGenerator::new(name)),
        }
    }
}

/// Generate files into the current project
pub struct GenerateCommand {
    target: GenerateTarget,
    force: bool,
    verbose: bool,
}

impl GenerateCommand {
    /// Create a new generate command
    pub const fn new(target: GenerateTarget, force: bool, verbose: bool) -> Self {
        Self {
            target,
            force,
            verbose,
        }
    }

    /// Execute the generate command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A template cannot be rendered or a schema model is missing
    /// - A target file exists and `--force` was not given
    /// - A post-generate command fails
    pub fn execute(&self) -> Result<()> {
        let (paths, config) = ProjectPaths::resolve_or_exit();
        let base = paths.base.clone();
        let generator = self.target.generator();

        println!(
            "\n{}Generating {}: {}",
            PACKAGE,
            generator.kind(),
            style(generator.name()).cyan().bold()
        );

        let ctx = GeneratorContext::from_config(paths, &config, true);
        let options = WriteOptions {
            overwrite_existing: self.force || config.generate.overwrite,
        };
        let tasks = generate_tasks(generator.as_ref(), &ctx, options)
            .with_context(|| format!("Failed to prepare {} files", generator.kind()))?;
        let adds_route = registers_new_routes(generator.as_ref(), &ctx);

        let mode = if self.verbose {
            DisplayMode::Verbose
        } else {
            DisplayMode::Default
        };
        TaskRunner::new(&base, mode)
            .run(&tasks)
            .into_result()
            .context("Generation stopped")?;

        let post_generate = &config.generate.post_generate;
        if !post_generate.is_empty() {
            println!();
            if !run_commands(post_generate, &base, self.verbose) {
                bail!("Post-generate commands failed");
            }
        }

        println!();
        println!(
            "  {} Generated {} {}",
            SUCCESS,
            generator.kind(),
            style(generator.name()).green()
        );
        if adds_route {
            println!(
                "  {} Route added to {}",
                SUCCESS,
                style(ctx.display_path(&ctx.paths.routes)).green()
            );
        }
        println!();

        Ok(())
    }
}
