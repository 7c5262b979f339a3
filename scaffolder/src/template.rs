//! Template materialization
//!
//! Templates are Handlebars sources rendered against a context made of the
//! entity `name`, its [`NameVariants`] and any generator-specific fields.
//! The rendered text then goes through the source formatter chosen by the
//! template's file extension.
//!
//! # Example
//!
//! ```
//! use scaffolder::template::TemplateMaterializer;
//!
//! # fn main() -> scaffolder::Result<()> {
//! let materializer = TemplateMaterializer::unformatted();
//! let out = materializer.render(
//!     "service.md.template",
//!     "# {{pluralPascalName}} for {{owner}}",
//!     "post",
//!     &serde_json::json!({ "owner": "blog" }),
//! )?;
//! assert_eq!(out, "# Posts for blog");
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, ScaffoldError};
use crate::files::read_file;
use crate::format::{format_for_path, Passthrough, SourceFormatter};
use crate::names::NameVariants;
use handlebars::Handlebars;
use serde_json::{Map, Value};
use std::path::Path;

/// Renders templates and formats the result
pub struct TemplateMaterializer {
    handlebars: Handlebars<'static>,
    formatter: Box<dyn SourceFormatter>,
}

impl TemplateMaterializer {
    /// Create a materializer that formats output with `formatter`
    #[must_use]
    pub fn new(formatter: Box<dyn SourceFormatter>) -> Self {
        let mut handlebars = Handlebars::new();

        // Disable HTML escaping since we're generating code
        handlebars.register_escape_fn(handlebars::no_escape);

        Self {
            handlebars,
            formatter,
        }
    }

    /// Create a materializer that leaves rendered output as is
    #[must_use]
    pub fn unformatted() -> Self {
        Self::new(Box::new(Passthrough))
    }

    /// Build the render context for `name`
    ///
    /// Keys from `extra` take precedence over the derived name variants.
    #[must_use]
    pub fn context(name: &str, extra: &Value) -> Value {
        let mut context = Map::new();
        context.insert("name".to_string(), Value::String(name.to_string()));

        if let Ok(Value::Object(variants)) = serde_json::to_value(NameVariants::derive(name)) {
            context.extend(variants);
        }
        if let Value::Object(extra) = extra {
            context.extend(extra.clone());
        }

        Value::Object(context)
    }

    /// Render `source` and format it for the dialect of `template_name`
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or formatting fails.
    pub fn render(
        &self,
        template_name: &str,
        source: &str,
        name: &str,
        extra: &Value,
    ) -> Result<String> {
        let context = Self::context(name, extra);
        let rendered = self
            .handlebars
            .render_template(source, &context)
            .map_err(|e| ScaffoldError::Template {
                name: template_name.to_string(),
                source: Box::new(e),
            })?;

        tracing::debug!(template = template_name, name, "rendered template");
        format_for_path(self.formatter.as_ref(), Path::new(template_name), &rendered)
    }

    /// Read the template at `path` and render it
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or rendering or
    /// formatting fails.
    pub fn render_file(&self, path: &Path, name: &str, extra: &Value) -> Result<String> {
        let source = read_file(path)?;
        self.render(&path.to_string_lossy(), &source, name, extra)
    }
}

impl Default for TemplateMaterializer {
    fn default() -> Self {
        Self::unformatted()
    }
}
