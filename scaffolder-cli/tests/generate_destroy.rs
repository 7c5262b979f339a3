//! Generate then destroy against a project on disk

use scaffolder::{DisplayMode, ProjectPaths, ScaffoldError, TaskRunner, WriteOptions};
use scaffolder_cli_lib::{
    destroy_tasks, generate_tasks, ComponentGenerator, Generator, GeneratorContext,
    PageGenerator, ServiceGenerator,
};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const ROUTES: &str = r#"import { Router, Route } from '@app/router'

const Routes = () => {
  return (
    <Router>
      <Route path="/" page={HomePage} name="home" />
      <Route notfound page={NotFoundPage} />
    </Router>
  )
}

export default Routes
"#;

const DMMF: &str = r#"{
  "datamodel": {
    "models": [
      {
        "name": "Post",
        "fields": [
          { "name": "id", "kind": "scalar", "type": "Int", "isRequired": true, "isList": false, "isId": true, "hasDefaultValue": true },
          { "name": "title", "kind": "scalar", "type": "String", "isRequired": true, "isList": false, "isId": false, "hasDefaultValue": false }
        ]
      }
    ],
    "enums": []
  }
}"#;

/// A project with a routes file, a schema and a precomputed data model
fn project() -> TempDir {
    let dir = tempdir().unwrap();
    let base = dir.path();

    fs::write(
        base.join("scaffolder.toml"),
        "[formatter]\nenabled = false\n\n[introspector]\ndmmf = \"api/db/dmmf.json\"\n",
    )
    .unwrap();
    fs::create_dir_all(base.join("web/src")).unwrap();
    fs::write(base.join("web/src/Routes.tsx"), ROUTES).unwrap();
    fs::create_dir_all(base.join("api/db")).unwrap();
    fs::write(base.join("api/db/schema.prisma"), "model Post {\n  id Int @id\n}\n").unwrap();
    fs::write(base.join("api/db/dmmf.json"), DMMF).unwrap();

    dir
}

fn context(base: &Path) -> GeneratorContext {
    let (paths, config) = ProjectPaths::resolve(base).unwrap();
    GeneratorContext::from_config(paths, &config, true)
}

fn generate(generator: &dyn Generator, ctx: &GeneratorContext, options: WriteOptions) -> scaffolder::Result<()> {
    let tasks = generate_tasks(generator, ctx, options)?;
    TaskRunner::new(&ctx.paths.base, DisplayMode::Silent)
        .run(&tasks)
        .into_result()
        .map(|_| ())
}

fn destroy(generator: &dyn Generator, ctx: &GeneratorContext) -> scaffolder::Result<()> {
    let tasks = destroy_tasks(generator, ctx)?;
    TaskRunner::new(&ctx.paths.base, DisplayMode::Silent)
        .run(&tasks)
        .into_result()
        .map(|_| ())
}

#[test]
fn test_page_round_trip() {
    let dir = project();
    let ctx = context(dir.path());
    let page = PageGenerator::new("About", None);

    generate(&page, &ctx, WriteOptions::default()).unwrap();

    let page_file = dir.path().join("web/src/pages/AboutPage/AboutPage.tsx");
    assert!(page_file.is_file());
    assert!(dir.path().join("web/src/pages/AboutPage/AboutPage.test.tsx").is_file());

    let routes = fs::read_to_string(&ctx.paths.routes).unwrap();
    assert!(routes.contains(
        "    <Router>\n      <Route path=\"/about\" page={AboutPage} name=\"about\" />\n      <Route path=\"/\""
    ));

    destroy(&page, &ctx).unwrap();

    assert!(!page_file.exists());
    assert!(!dir.path().join("web/src/pages/AboutPage").exists());
    assert_eq!(fs::read_to_string(&ctx.paths.routes).unwrap(), ROUTES);
}

#[test]
fn test_generate_refuses_existing_files_without_force() {
    let dir = project();
    let ctx = context(dir.path());
    let component = ComponentGenerator::new("UserCard");

    generate(&component, &ctx, WriteOptions::default()).unwrap();
    let err = generate(&component, &ctx, WriteOptions::default()).unwrap_err();
    assert!(err.is_already_exists());
    assert!(matches!(err, ScaffoldError::AlreadyExists(_)));

    generate(&component, &ctx, WriteOptions::overwrite()).unwrap();
}

#[test]
fn test_destroy_removes_every_script_variant() {
    let dir = project();
    let ctx = context(dir.path());
    let legacy = dir.path().join("web/src/components/UserCard/UserCard.js");
    fs::create_dir_all(legacy.parent().unwrap()).unwrap();
    fs::write(&legacy, "export default null\n").unwrap();

    let component = ComponentGenerator::new("UserCard");
    generate(&component, &ctx, WriteOptions::default()).unwrap();
    assert!(dir.path().join("web/src/components/UserCard/UserCard.tsx").is_file());

    destroy(&component, &ctx).unwrap();
    assert!(!legacy.exists());
    assert!(!dir.path().join("web/src/components/UserCard").exists());
}

#[test]
fn test_destroy_keeps_directories_with_other_files() {
    let dir = project();
    let ctx = context(dir.path());
    let component = ComponentGenerator::new("UserCard");

    generate(&component, &ctx, WriteOptions::default()).unwrap();
    let extra = dir.path().join("web/src/components/UserCard/UserCard.stories.tsx");
    fs::write(&extra, "export default {}\n").unwrap();

    destroy(&component, &ctx).unwrap();
    assert!(extra.is_file());
    assert!(!dir.path().join("web/src/components/UserCard/UserCard.tsx").exists());
}

#[test]
fn test_destroy_twice_is_harmless() {
    let dir = project();
    let ctx = context(dir.path());
    let page = PageGenerator::new("Contact", None);

    generate(&page, &ctx, WriteOptions::default()).unwrap();
    destroy(&page, &ctx).unwrap();
    destroy(&page, &ctx).unwrap();
    assert_eq!(fs::read_to_string(&ctx.paths.routes).unwrap(), ROUTES);
}

#[test]
fn test_service_from_precomputed_model() {
    let dir = project();
    let ctx = context(dir.path());

    generate(&ServiceGenerator::new("post"), &ctx, WriteOptions::default()).unwrap();

    let service = fs::read_to_string(dir.path().join("api/src/services/posts/posts.ts")).unwrap();
    assert!(service.contains("export const posts = () => {"));
    assert!(service.contains("return db.post.findMany()"));
    assert!(service.contains("export const deletePost = ({ id }) => {"));

    let err = generate(&ServiceGenerator::new("comment"), &ctx, WriteOptions::default()).unwrap_err();
    assert!(matches!(err, ScaffoldError::LookupNotFound { .. }));
    assert!(!dir.path().join("api/src/services/comments").exists());
}

#[test]
fn test_template_override() {
    let dir = project();
    fs::write(
        dir.path().join("scaffolder.toml"),
        "[formatter]\nenabled = false\n\n[templates]\ndir = \"templates\"\n",
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("templates/component")).unwrap();
    fs::write(
        dir.path().join("templates/component/component.tsx.template"),
        "export const {{pascalName}} = () => null\n",
    )
    .unwrap();

    let ctx = context(dir.path());
    generate(&ComponentGenerator::new("badge"), &ctx, WriteOptions::default()).unwrap();

    let component = fs::read_to_string(dir.path().join("web/src/components/Badge/Badge.tsx")).unwrap();
    assert_eq!(component, "export const Badge = () => null\n");
}
