//! Generators
//!
//! A generator maps an entity name to the files it owns and, optionally, to
//! route declarations. The same [`Generator::files`] mapping drives both
//! `generate` (write every entry) and `destroy` (delete every entry and clean
//! up the directories left empty).

use scaffolder::config::ScaffolderConfig;
use scaffolder::files::{read_file, relative_to};
use scaffolder::format::{PrettierFormatter, SourceFormatter};
use scaffolder::router::{add_routes, RoutePatch};
use scaffolder::schema::{CommandIntrospector, PrecomputedDmmf, SchemaIntrospector};
use scaffolder::tasks::{build_delete_tasks, build_write_tasks};
use scaffolder::{FileTask, PathContentMap, ProjectPaths, Result, TemplateMaterializer, WriteOptions};
use serde_json::Value;
use std::path::Path;

use crate::templates::TemplateSet;

pub mod component;
pub mod page;
pub mod service;

pub use component::ComponentGenerator;
pub use page::PageGenerator;
pub use service::ServiceGenerator;

/// Everything a generator needs to produce its files
pub struct GeneratorContext {
    /// Project layout
    pub paths: ProjectPaths,
    /// Renders and formats templates
    pub materializer: TemplateMaterializer,
    /// Template lookup with project overrides
    pub templates: TemplateSet,
    /// Schema access for generators working from a model
    pub introspector: Box<dyn SchemaIntrospector>,
}

impl GeneratorContext {
    /// Build the context for `paths` as configured by `config`
    ///
    /// Formatting is skipped when `format` is false or disabled in the
    /// configuration.
    #[must_use]
    pub fn from_config(paths: ProjectPaths, config: &ScaffolderConfig, format: bool) -> Self {
        let materializer = if format && config.formatter.enabled {
            let formatter: Box<dyn SourceFormatter> = Box::new(
                PrettierFormatter::new(&config.formatter.command, &paths.base)
                    .with_config(paths.formatter_config.clone()),
            );
            TemplateMaterializer::new(formatter)
        } else {
            TemplateMaterializer::unformatted()
        };

        let introspector = config.introspector.dmmf.as_ref().map_or_else(
            || {
                Box::new(CommandIntrospector::new(
                    &config.introspector.command,
                    config.introspector.args.clone(),
                    &paths.base,
                )) as Box<dyn SchemaIntrospector>
            },
            |dmmf| {
                Box::new(PrecomputedDmmf::new(paths.base.join(dmmf))) as Box<dyn SchemaIntrospector>
            },
        );

        let templates = TemplateSet::new(
            config
                .templates
                .dir
                .as_ref()
                .map(|dir| paths.base.join(dir)),
        );

        Self {
            paths,
            materializer,
            templates,
            introspector,
        }
    }

    /// Render the `file` template of `kind` for `name`
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be loaded, rendered or
    /// formatted.
    pub fn render(
        &self,
        kind: &str,
        file: &str,
        builtin: &'static str,
        name: &str,
        extra: &Value,
    ) -> Result<String> {
        let template = self.templates.resolve(kind, file, builtin)?;
        self.materializer
            .render(&template.name, &template.source, name, extra)
    }

    /// `path` relative to the project base with forward slashes
    #[must_use]
    pub fn display_path(&self, path: &Path) -> String {
        relative_to(&self.paths.base, path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

/// Produces the files (and routes) for one kind of artifact
pub trait Generator {
    /// Short kind name, used for template lookup and messages
    fn kind(&self) -> &'static str;

    /// The entity name this generator was created for
    fn name(&self) -> &str;

    /// Target path to rendered content, in write order
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails or required schema information is
    /// missing.
    fn files(&self, ctx: &GeneratorContext) -> Result<PathContentMap>;

    /// Route declarations to register after writing
    fn routes(&self) -> Vec<String> {
        Vec::new()
    }

    /// Names of the routes to unregister when destroying
    fn route_names(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Tasks that write every generated file, then register routes
///
/// # Errors
///
/// Returns an error if the generator cannot produce its files.
pub fn generate_tasks(
    generator: &dyn Generator,
    ctx: &GeneratorContext,
    options: WriteOptions,
) -> Result<Vec<FileTask>> {
    let files = generator.files(ctx)?;
    let mut tasks = build_write_tasks(&files, options);

    let routes = generator.routes();
    if !routes.is_empty() {
        tasks.push(FileTask::PatchRoutes {
            routes_file: ctx.paths.routes.clone(),
            patch: RoutePatch::Add(routes),
        });
    }

    Ok(tasks)
}

/// Whether running the generator would put a new route in the routes file
///
/// False when the generator has no routes, when every route is already
/// declared, or when the routes file cannot be read.
#[must_use]
pub fn registers_new_routes(generator: &dyn Generator, ctx: &GeneratorContext) -> bool {
    let routes = generator.routes();
    !routes.is_empty()
        && read_file(&ctx.paths.routes).is_ok_and(|content| add_routes(&content, &routes) != content)
}

/// Tasks that delete every generated file, clean up, then unregister routes
///
/// # Errors
///
/// Returns an error if the generator cannot produce its file list.
pub fn destroy_tasks(generator: &dyn Generator, ctx: &GeneratorContext) -> Result<Vec<FileTask>> {
    let files = generator.files(ctx)?;
    let mut tasks = build_delete_tasks(&files);

    let names = generator.route_names();
    if !names.is_empty() {
        tasks.push(FileTask::PatchRoutes {
            routes_file: ctx.paths.routes.clone(),
            patch: RoutePatch::Remove(names),
        });
    }

    Ok(tasks)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use scaffolder::schema::Datamodel;

    pub struct FixedSchema(pub &'static str);

    impl SchemaIntrospector for FixedSchema {
        fn introspect(&self, _schema_source: &str) -> Result<Datamodel> {
            Datamodel::from_dmmf_json(self.0)
        }
    }

    pub fn context(base: &Path) -> GeneratorContext {
        GeneratorContext {
            paths: ProjectPaths::from_base(base, &ScaffolderConfig::default()),
            materializer: TemplateMaterializer::unformatted(),
            templates: TemplateSet::default(),
            introspector: Box::new(FixedSchema(r#"{"datamodel":{"models":[],"enums":[]}}"#)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffolder::{DisplayMode, TaskRunner};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_page_tasks_end_with_route_patch() {
        let dir = tempdir().unwrap();
        let ctx = test_support::context(dir.path());
        let page = PageGenerator::new("About", None);

        let tasks = generate_tasks(&page, &ctx, WriteOptions::default()).unwrap();
        assert_eq!(tasks.len(), 3);
        assert!(matches!(
            tasks.last(),
            Some(FileTask::PatchRoutes { patch: RoutePatch::Add(_), .. })
        ));

        let tasks = destroy_tasks(&page, &ctx).unwrap();
        assert!(matches!(tasks[2], FileTask::Cleanup { .. }));
        assert!(matches!(
            tasks.last(),
            Some(FileTask::PatchRoutes { patch: RoutePatch::Remove(names), .. }) if names == &["about"]
        ));
    }

    #[test]
    fn test_component_has_no_route_patch() {
        let dir = tempdir().unwrap();
        let ctx = test_support::context(dir.path());
        let component = ComponentGenerator::new("UserCard");

        let tasks = generate_tasks(&component, &ctx, WriteOptions::default()).unwrap();
        assert!(tasks.iter().all(|t| matches!(t, FileTask::Write { .. })));
    }

    #[test]
    fn test_registers_new_routes_only_when_missing() {
        let dir = tempdir().unwrap();
        let ctx = test_support::context(dir.path());
        let page = PageGenerator::new("About", None);
        assert!(!registers_new_routes(&page, &ctx));

        fs::create_dir_all(ctx.paths.routes.parent().unwrap()).unwrap();
        fs::write(&ctx.paths.routes, "<Router>\n</Router>\n").unwrap();
        assert!(registers_new_routes(&page, &ctx));
        assert!(!registers_new_routes(&ComponentGenerator::new("About"), &ctx));

        let tasks = generate_tasks(&page, &ctx, WriteOptions::default()).unwrap();
        assert!(TaskRunner::new(dir.path(), DisplayMode::Silent).run(&tasks).success());
        assert!(!registers_new_routes(&page, &ctx));
    }

    #[test]
    fn test_display_path_is_relative() {
        let dir = tempdir().unwrap();
        let ctx = test_support::context(dir.path());
        let path = ctx.paths.pages.join("AboutPage/AboutPage.tsx");
        assert_eq!(ctx.display_path(&path), "web/src/pages/AboutPage/AboutPage.tsx");
    }
}
