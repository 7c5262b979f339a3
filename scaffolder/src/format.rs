//! Source formatting of rendered templates
//!
//! Rendered output is handed to an external formatter with a dialect chosen
//! from the file extension. Files with any other extension pass through
//! unchanged.

use crate::error::{Result, ScaffoldError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Formatter config files looked up in the project base, in order
const FORMATTER_CONFIG_FILES: &[&str] = &["prettier.config.js", ".prettierrc", ".prettierrc.json"];

/// Syntax dialect passed to the formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceDialect {
    /// Style sheets (`.css`)
    Css,
    /// Plain scripts (`.js`)
    Babel,
    /// Typed scripts (`.ts`, `.tsx`)
    BabelTs,
}

impl SourceDialect {
    /// Dialect for a file path, ignoring a trailing `.template` suffix
    ///
    /// # Examples
    ///
    /// ```
    /// # use scaffolder::format::SourceDialect;
    /// # use std::path::Path;
    /// assert_eq!(SourceDialect::from_path(Path::new("page.tsx.template")), Some(SourceDialect::BabelTs));
    /// assert_eq!(SourceDialect::from_path(Path::new("README.md")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let path = if path.extension().is_some_and(|ext| ext == "template") {
            path.with_extension("")
        } else {
            path.to_path_buf()
        };

        match path.extension()?.to_str()? {
            "css" => Some(Self::Css),
            "js" => Some(Self::Babel),
            "ts" | "tsx" => Some(Self::BabelTs),
            _ => None,
        }
    }

    /// Parser name understood by prettier
    #[must_use]
    pub const fn parser(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Babel => "babel",
            Self::BabelTs => "babel-ts",
        }
    }
}

/// Reformats source text of a known dialect
pub trait SourceFormatter: Send + Sync {
    /// Format `source` as `dialect`
    ///
    /// # Errors
    ///
    /// Returns an error if the formatter rejects the input.
    fn format(&self, source: &str, dialect: SourceDialect) -> Result<String>;
}

/// Formatter that returns its input unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl SourceFormatter for Passthrough {
    fn format(&self, source: &str, _dialect: SourceDialect) -> Result<String> {
        Ok(source.to_string())
    }
}

/// Formatter backed by an external `prettier` executable
///
/// The source is written to the process's stdin and the formatted result is
/// read from stdout. If the executable cannot be found, formatting degrades to
/// a pass-through with a warning.
#[derive(Debug, Clone)]
pub struct PrettierFormatter {
    command: String,
    config: Option<PathBuf>,
    cwd: PathBuf,
}

impl PrettierFormatter {
    /// Create a formatter running `command` from `cwd`
    pub fn new(command: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            config: None,
            cwd: cwd.into(),
        }
    }

    /// Use an explicit formatter configuration file
    #[must_use]
    pub fn with_config(mut self, config: Option<PathBuf>) -> Self {
        self.config = config;
        self
    }
}

impl SourceFormatter for PrettierFormatter {
    fn format(&self, source: &str, dialect: SourceDialect) -> Result<String> {
        let mut command = Command::new(&self.command);
        command
            .current_dir(&self.cwd)
            .args(["--parser", dialect.parser()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(config) = &self.config {
            command.arg("--config").arg(config);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(command = %self.command, "formatter not found, leaving output unformatted");
                return Ok(source.to_string());
            }
            Err(e) => return Err(ScaffoldError::Format(format!("{}: {e}", self.command))),
        };

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| ScaffoldError::Format(format!("writing to {}: {e}", self.command)))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| ScaffoldError::Format(format!("{}: {e}", self.command)))?;

        if !output.status.success() {
            return Err(ScaffoldError::Format(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| ScaffoldError::Format(format!("non UTF-8 output: {e}")))
    }
}

/// Locate the project's formatter configuration
///
/// A missing configuration is not an error: `None` means formatter defaults.
#[must_use]
pub fn find_formatter_config(base: &Path) -> Option<PathBuf> {
    FORMATTER_CONFIG_FILES
        .iter()
        .map(|name| base.join(name))
        .find(|path| path.is_file())
}

/// Format `source` according to the dialect of `path`, if it has one
///
/// # Errors
///
/// Returns an error if the formatter rejects the input.
pub fn format_for_path(
    formatter: &dyn SourceFormatter,
    path: &Path,
    source: &str,
) -> Result<String> {
    SourceDialect::from_path(path).map_or_else(
        || Ok(source.to_string()),
        |dialect| formatter.format(source, dialect),
    )
}
