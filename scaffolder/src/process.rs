//! Sequential external command execution
//!
//! Auxiliary setup steps (installing packages, running a linter over generated
//! files, ...) run one after the other. The first failure stops the sequence
//! and is reported as `false` rather than an error.

use crate::error::ScaffoldError;
use console::style;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// One external command to run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Human-readable step title
    pub title: String,
    /// Executable
    pub cmd: String,
    /// Arguments
    #[serde(default)]
    pub args: Vec<String>,
    /// Working directory; the project base when unset
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a command step
    pub fn new<I, S>(title: impl Into<String>, cmd: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            cmd: cmd.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    /// Full command line for display
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.cmd.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run this command from `base` unless it names its own directory
    ///
    /// In verbose mode the child inherits stdout and stderr, otherwise its
    /// output is captured and only shown on failure.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::CommandFailed`] if the command cannot be
    /// started or exits non-zero.
    pub fn run(&self, base: &Path, verbose: bool) -> Result<(), ScaffoldError> {
        let cwd = self.cwd.as_ref().map_or_else(|| base.to_path_buf(), |dir| base.join(dir));
        let failed = |message: String| ScaffoldError::CommandFailed {
            command: self.command_line(),
            message,
        };

        let mut command = Command::new(&self.cmd);
        command.args(&self.args).current_dir(&cwd);

        tracing::debug!(command = %self.command_line(), cwd = %cwd.display(), "running command");

        if verbose {
            let status = command
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(|e| failed(e.to_string()))?;
            if !status.success() {
                return Err(failed(status.to_string()));
            }
        } else {
            let output = command.output().map_err(|e| failed(e.to_string()))?;
            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(failed(format!("{}\n{}", output.status, stderr.trim())));
            }
        }

        Ok(())
    }
}

/// Run `commands` in order, stopping at the first failure
///
/// Returns whether every command succeeded. Failures are printed, not
/// propagated.
pub fn run_commands(commands: &[CommandSpec], base: &Path, verbose: bool) -> bool {
    for spec in commands {
        println!("  {} {}", style("›").cyan(), spec.title);

        if let Err(e) = spec.run(base, verbose) {
            tracing::error!(error = %e, "command failed");
            eprintln!("  {} {}", style("✖").red(), style(e).red());
            return false;
        }

        println!("  {} {}", style("✔").green(), spec.title);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_command_line() {
        let spec = CommandSpec::new("Install", "yarn", ["add", "-D", "prettier"]);
        assert_eq!(spec.command_line(), "yarn add -D prettier");
        assert_eq!(spec.cwd, None);
    }

    #[test]
    fn test_empty_sequence_succeeds() {
        let dir = tempdir().unwrap();
        assert!(run_commands(&[], dir.path(), false));
    }

    #[cfg(unix)]
    #[test]
    fn test_stops_at_first_failure() {
        let dir = tempdir().unwrap();
        let marker = dir.path().join("marker");
        let commands = vec![
            CommandSpec::new("Fail", "false", Vec::<String>::new()),
            CommandSpec::new("Touch", "touch", [marker.to_string_lossy().to_string()]),
        ];

        assert!(!run_commands(&commands, dir.path(), false));
        assert!(!marker.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_in_order_from_base() {
        let dir = tempdir().unwrap();
        let commands = vec![
            CommandSpec::new("Create", "mkdir", ["sub"]),
            CommandSpec::new("Touch", "touch", ["sub/done"]),
        ];

        assert!(run_commands(&commands, dir.path(), false));
        assert!(dir.path().join("sub/done").exists());
    }

    #[test]
    fn test_missing_executable_reports_failure() {
        let dir = tempdir().unwrap();
        let spec = CommandSpec::new("Nope", "scaffolder-test-no-such-command", Vec::<String>::new());
        assert!(matches!(
            spec.run(dir.path(), false),
            Err(ScaffoldError::CommandFailed { .. })
        ));
    }
}
