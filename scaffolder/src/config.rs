//! Configuration management for scaffolder
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `SCAFFOLDER_` prefix, `__`
//!    separates nested keys)
//! 2. `<project>/scaffolder.toml`
//! 3. Hardcoded defaults (fallback)
//!
//! The presence of `scaffolder.toml` is also what marks a directory as the
//! project base, see [`crate::paths::ProjectPaths`].
//!
//! # Example Configuration
//!
//! ```toml
//! # scaffolder.toml
//! [paths]
//! web = "web"
//! api = "api"
//! routes = "web/src/Routes.tsx"
//!
//! [formatter]
//! enabled = true
//! command = "prettier"
//!
//! [introspector]
//! command = "schema-introspect"
//!
//! [generate]
//! overwrite = false
//!
//! [[generate.post_generate]]
//! title = "Linting generated files"
//! cmd = "yarn"
//! args = ["lint", "--fix"]
//! ```

use crate::error::{Result, ScaffoldError};
use crate::process::CommandSpec;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file that marks a project root
pub const CONFIG_FILE: &str = "scaffolder.toml";

/// Project layout, relative to the project base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Web side directory
    pub web: PathBuf,
    /// API side directory
    pub api: PathBuf,
    /// Routes file; when unset the first existing `Routes.{tsx,ts,js}` in
    /// `<web>/src` is used
    pub routes: Option<PathBuf>,
    /// Schema definition file
    pub schema: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            web: PathBuf::from("web"),
            api: PathBuf::from("api"),
            routes: None,
            schema: PathBuf::from("api/db/schema.prisma"),
        }
    }
}

/// Source formatter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterSettings {
    /// Format rendered templates
    pub enabled: bool,
    /// Formatter executable
    pub command: String,
}

impl Default for FormatterSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "prettier".to_string(),
        }
    }
}

/// Schema introspector settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntrospectorSettings {
    /// Command that reads the schema on stdin and prints the data model
    pub command: String,
    /// Extra arguments for `command`
    pub args: Vec<String>,
    /// Precomputed data model document; takes precedence over `command`
    pub dmmf: Option<PathBuf>,
}

impl Default for IntrospectorSettings {
    fn default() -> Self {
        Self {
            command: "schema-introspect".to_string(),
            args: Vec::new(),
            dmmf: None,
        }
    }
}

/// Template lookup settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory whose `<kind>/<file>.template` entries override the
    /// built-in templates
    pub dir: Option<PathBuf>,
}

/// Generation behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateSettings {
    /// Overwrite existing files without `--force`
    pub overwrite: bool,
    /// Commands run in order after files were generated
    pub post_generate: Vec<CommandSpec>,
}

/// Complete scaffolder configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffolderConfig {
    /// Project layout
    pub paths: PathSettings,
    /// Source formatter
    pub formatter: FormatterSettings,
    /// Schema introspector
    pub introspector: IntrospectorSettings,
    /// Template overrides
    pub templates: TemplateSettings,
    /// Generation behaviour
    pub generate: GenerateSettings,
}

impl ScaffolderConfig {
    /// Load configuration for the project rooted at `base`
    ///
    /// A missing `scaffolder.toml` is not an error; defaults and environment
    /// variables still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or environment contain invalid values.
    pub fn load(base: &Path) -> Result<Self> {
        Self::figment(base)
            .extract()
            .map_err(|e| ScaffoldError::from(Box::new(e)))
    }

    /// Layered configuration sources for `base`
    #[must_use]
    pub fn figment(base: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(base.join(CONFIG_FILE)))
            .merge(Env::prefixed("SCAFFOLDER_").split("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|jail| {
            let config = ScaffolderConfig::load(jail.directory()).unwrap();
            assert_eq!(config, ScaffolderConfig::default());
            assert_eq!(config.paths.schema, PathBuf::from("api/db/schema.prisma"));
            assert!(config.formatter.enabled);
            Ok(())
        });
    }

    #[test]
    fn test_file_values() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                [paths]
                routes = "web/src/AppRoutes.js"

                [formatter]
                enabled = false

                [[generate.post_generate]]
                title = "Lint"
                cmd = "yarn"
                args = ["lint"]
                "#,
            )?;

            let config = ScaffolderConfig::load(jail.directory()).unwrap();
            assert_eq!(config.paths.routes, Some(PathBuf::from("web/src/AppRoutes.js")));
            assert_eq!(config.paths.web, PathBuf::from("web"));
            assert!(!config.formatter.enabled);
            assert_eq!(config.generate.post_generate.len(), 1);
            assert_eq!(config.generate.post_generate[0].cmd, "yarn");
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "[formatter]\ncommand = \"prettier\"")?;
            jail.set_env("SCAFFOLDER_FORMATTER__COMMAND", "dprint");

            let config = ScaffolderConfig::load(jail.directory()).unwrap();
            assert_eq!(config.formatter.command, "dprint");
            Ok(())
        });
    }
}
