//! `scaffolder init`

use anyhow::{Context, Result};
use console::style;
use scaffolder::config::CONFIG_FILE;
use scaffolder::files::write_file;
use scaffolder::{ScaffolderConfig, WriteOptions};
use std::path::Path;

/// Mark a directory as a project by writing a default `scaffolder.toml`
pub struct InitCommand {
    force: bool,
}

impl InitCommand {
    /// Create a new init command
    pub const fn new(force: bool) -> Self {
        Self { force }
    }

    /// Write the configuration into the working directory
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists and `--force` was not given, or it
    /// cannot be written.
    pub fn execute(&self) -> Result<()> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        self.write_config(&cwd)?;

        println!(
            "{} {}",
            style("Created").green().bold(),
            style(CONFIG_FILE).cyan()
        );
        Ok(())
    }

    fn write_config(&self, dir: &Path) -> Result<()> {
        let contents = default_config()?;
        let options = WriteOptions {
            overwrite_existing: self.force,
        };
        write_file(&dir.join(CONFIG_FILE), &contents, options)?;
        Ok(())
    }
}

fn default_config() -> Result<String> {
    toml::to_string_pretty(&ScaffolderConfig::default())
        .context("Failed to serialize default configuration")
}
