//! Project path resolution
//!
//! The project base is the nearest ancestor of the working directory that
//! holds a `scaffolder.toml`. Every well-known location is derived from it once
//! and the resulting [`ProjectPaths`] is passed to the components that need it.

use crate::config::{ScaffolderConfig, CONFIG_FILE};
use crate::error::{Result, ScaffoldError};
use console::style;
use std::path::{Path, PathBuf};

/// Routes file names tried in order when none is configured
const ROUTES_CANDIDATES: &[&str] = &["Routes.tsx", "Routes.ts", "Routes.js"];

/// Well-known absolute paths of the current project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// Project base directory
    pub base: PathBuf,
    /// `web/src`
    pub web_src: PathBuf,
    /// `web/src/pages`
    pub pages: PathBuf,
    /// `web/src/components`
    pub components: PathBuf,
    /// `web/src/layouts`
    pub layouts: PathBuf,
    /// Routes file
    pub routes: PathBuf,
    /// `api/src`
    pub api_src: PathBuf,
    /// `api/src/services`
    pub services: PathBuf,
    /// Directory holding the schema file
    pub schema_dir: PathBuf,
    /// Schema definition file
    pub schema: PathBuf,
    /// Formatter configuration, if the project has one
    pub formatter_config: Option<PathBuf>,
}

impl ProjectPaths {
    /// Derive all paths for the project rooted at `base`
    #[must_use]
    pub fn from_base(base: &Path, config: &ScaffolderConfig) -> Self {
        let web_src = base.join(&config.paths.web).join("src");
        let api_src = base.join(&config.paths.api).join("src");
        let schema = base.join(&config.paths.schema);
        let schema_dir = schema
            .parent()
            .map_or_else(|| base.to_path_buf(), Path::to_path_buf);

        let routes = config.paths.routes.as_ref().map_or_else(
            || {
                ROUTES_CANDIDATES
                    .iter()
                    .map(|name| web_src.join(name))
                    .find(|path| path.is_file())
                    .unwrap_or_else(|| web_src.join(ROUTES_CANDIDATES[0]))
            },
            |routes| base.join(routes),
        );

        Self {
            base: base.to_path_buf(),
            pages: web_src.join("pages"),
            components: web_src.join("components"),
            layouts: web_src.join("layouts"),
            services: api_src.join("services"),
            formatter_config: crate::format::find_formatter_config(base),
            web_src,
            routes,
            api_src,
            schema_dir,
            schema,
        }
    }

    /// Find the project base above `start` and derive its paths
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::ProjectResolution`] if no ancestor of `start`
    /// contains `scaffolder.toml`.
    pub fn find_base(start: &Path) -> Result<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(CONFIG_FILE).is_file())
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                ScaffoldError::ProjectResolution(format!(
                    "Could not find a \"{CONFIG_FILE}\" file, are you sure you're in a project?"
                ))
            })
    }

    /// Resolve the project containing `start`, loading its configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no project is found or its configuration is invalid.
    pub fn resolve(start: &Path) -> Result<(Self, ScaffolderConfig)> {
        let base = Self::find_base(start)?;
        let config = ScaffolderConfig::load(&base)?;
        tracing::debug!(base = %base.display(), "resolved project");
        Ok((Self::from_base(&base, &config), config))
    }

    /// Resolve the project containing the working directory or exit
    ///
    /// Nothing can be generated without valid paths, so resolution failure
    /// prints the reason and terminates the process.
    #[must_use]
    pub fn resolve_or_exit() -> (Self, ScaffolderConfig) {
        let resolved = std::env::current_dir()
            .map_err(|e| ScaffoldError::io(".", e))
            .and_then(|cwd| Self::resolve(&cwd));

        match resolved {
            Ok(resolved) => resolved,
            Err(e) => {
                eprintln!("{}", style(e).red().bold());
                std::process::exit(1);
            }
        }
    }
}
