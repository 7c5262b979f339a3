//! Template lookup
//!
//! Every generator ships its templates compiled in. A project can replace any
//! of them by placing `<kind>/<file>.template` in the configured templates
//! directory, e.g. `templates/page/page.tsx.template`.

use scaffolder::files::read_file;
use scaffolder::Result;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub mod files;
pub use files::*;

/// Suffix of every template file name
pub const TEMPLATE_SUFFIX: &str = ".template";

/// A template ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    /// Name used for diagnostics and to pick the output dialect
    pub name: String,
    /// Template text
    pub source: Cow<'static, str>,
}

/// Resolves templates, preferring project overrides over built-in copies
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    override_dir: Option<PathBuf>,
}

impl TemplateSet {
    /// Look up overrides in `override_dir`, if any
    #[must_use]
    pub const fn new(override_dir: Option<PathBuf>) -> Self {
        Self { override_dir }
    }

    /// Path an override for `kind`/`file` would live at
    #[must_use]
    pub fn override_path(&self, kind: &str, file: &str) -> Option<PathBuf> {
        self.override_dir
            .as_deref()
            .map(|dir| template_path(dir, kind, file))
    }

    /// Resolve the `file` template of generator `kind`
    ///
    /// # Errors
    ///
    /// Returns an error if an override exists but cannot be read.
    pub fn resolve(&self, kind: &str, file: &str, builtin: &'static str) -> Result<TemplateSource> {
        if let Some(path) = self.override_path(kind, file).filter(|path| path.is_file()) {
            tracing::debug!(template = %path.display(), "using template override");
            return Ok(TemplateSource {
                name: path.to_string_lossy().into_owned(),
                source: Cow::Owned(read_file(&path)?),
            });
        }

        Ok(TemplateSource {
            name: format!("{kind}/{file}{TEMPLATE_SUFFIX}"),
            source: Cow::Borrowed(builtin),
        })
    }
}

fn template_path(dir: &Path, kind: &str, file: &str) -> PathBuf {
    dir.join(kind).join(format!("{file}{TEMPLATE_SUFFIX}"))
}
