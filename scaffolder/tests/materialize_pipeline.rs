//! Render, write and delete through the public API

use scaffolder::format::{SourceDialect, SourceFormatter};
use scaffolder::router::RoutePatch;
use scaffolder::tasks::{build_delete_tasks, build_write_tasks, TaskOutcome};
use scaffolder::{
    DisplayMode, FileTask, NameVariants, PathContentMap, TaskRunner, TemplateMaterializer,
    WriteOptions,
};
use serde_json::json;
use std::fs;
use tempfile::tempdir;

/// Records the dialect it was asked to format for in a trailing comment
struct DialectStamp;

impl SourceFormatter for DialectStamp {
    fn format(&self, source: &str, dialect: SourceDialect) -> scaffolder::Result<String> {
        Ok(format!("{source}// {}\n", dialect.parser()))
    }
}

#[test]
fn test_render_write_delete() {
    let dir = tempdir().unwrap();
    let base = dir.path();
    let materializer = TemplateMaterializer::new(Box::new(DialectStamp));

    let variants = NameVariants::derive("blog_posts");
    let service_dir = base.join("services").join(&variants.plural_camel_name);

    let mut files = PathContentMap::new();
    files.insert(
        service_dir.join(format!("{}.ts", variants.plural_camel_name)),
        materializer
            .render(
                "service.ts.template",
                "export const {{pluralCamelName}} = '{{table}}'\n",
                "blog_posts",
                &json!({ "table": "blog_post" }),
            )
            .unwrap(),
    );
    files.insert(
        service_dir.join("README.md"),
        materializer
            .render("readme.md.template", "# {{pluralPascalName}}\n", "blog_posts", &json!({}))
            .unwrap(),
    );

    let runner = TaskRunner::new(base, DisplayMode::Silent);
    let report = runner.run(&build_write_tasks(&files, WriteOptions::default()));
    assert!(report.success());

    let service = fs::read_to_string(service_dir.join("blogPosts.ts")).unwrap();
    assert_eq!(service, "export const blogPosts = 'blog_post'\n// babel-ts\n");
    let readme = fs::read_to_string(service_dir.join("README.md")).unwrap();
    assert_eq!(readme, "# BlogPosts\n");

    let report = runner.run(&build_delete_tasks(&files));
    let records = report.into_result().unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.outcome == TaskOutcome::Completed));
    assert!(!service_dir.exists());
    assert!(base.join("services").is_dir());
}

#[test]
fn test_failed_write_stops_run_without_rollback() {
    let dir = tempdir().unwrap();
    let base = dir.path();
    fs::write(base.join("b.ts"), "existing").unwrap();

    let mut files = PathContentMap::new();
    files.insert(base.join("a.ts"), "a".to_string());
    files.insert(base.join("b.ts"), "b".to_string());
    files.insert(base.join("c.ts"), "c".to_string());

    let report = TaskRunner::new(base, DisplayMode::Silent)
        .run(&build_write_tasks(&files, WriteOptions::default()));

    assert!(!report.success());
    assert_eq!(report.records.len(), 2);
    assert!(base.join("a.ts").exists());
    assert!(!base.join("c.ts").exists());
    assert_eq!(fs::read_to_string(base.join("b.ts")).unwrap(), "existing");
    assert!(report.into_result().unwrap_err().is_already_exists());
}

#[test]
fn test_route_patch_tasks() {
    let dir = tempdir().unwrap();
    let routes_file = dir.path().join("Routes.tsx");
    let original = "<Router>\n  <Route path=\"/\" page={HomePage} name=\"home\" />\n</Router>\n";
    fs::write(&routes_file, original).unwrap();

    let runner = TaskRunner::new(dir.path(), DisplayMode::Silent);
    let add = FileTask::PatchRoutes {
        routes_file: routes_file.clone(),
        patch: RoutePatch::Add(vec![
            r#"<Route path="/faq" page={FaqPage} name="faq" />"#.to_string(),
        ]),
    };
    assert_eq!(add.title(dir.path()), "Adding routes to `./Routes.tsx`...");
    assert!(runner.run(&[add]).success());
    assert!(fs::read_to_string(&routes_file).unwrap().contains("name=\"faq\""));

    let remove = FileTask::PatchRoutes {
        routes_file: routes_file.clone(),
        patch: RoutePatch::Remove(vec!["faq".to_string()]),
    };
    assert!(runner.run(&[remove.clone()]).success());
    assert_eq!(fs::read_to_string(&routes_file).unwrap(), original);

    fs::remove_file(&routes_file).unwrap();
    let report = runner.run(&[remove]);
    assert!(matches!(report.records[0].outcome, TaskOutcome::Skipped(_)));
}
