//! Page generator
//!
//! `scaffolder generate page About` writes
//! `web/src/pages/AboutPage/AboutPage.tsx` with its test and registers
//! `<Route path="/about" page={AboutPage} name="about" />`.

use super::{Generator, GeneratorContext};
use crate::templates::{PAGE, PAGE_TEST};
use scaffolder::{NameVariants, PathContentMap, Result};
use serde_json::json;

/// Generates a routed page component
#[derive(Debug, Clone)]
pub struct PageGenerator {
    name: String,
    variants: NameVariants,
    path: String,
}

impl PageGenerator {
    /// Create a page generator for `name`
    ///
    /// The route path defaults to `/<name-in-kebab-case>`. A bare parameter
    /// such as `{id}` is appended to that default.
    #[must_use]
    pub fn new(name: &str, path: Option<&str>) -> Self {
        let variants = NameVariants::derive(name);
        let path = route_path(path, &variants.singular_param_name);
        Self {
            name: name.to_string(),
            variants,
            path,
        }
    }

    /// Route path the page is served at
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    fn component_name(&self) -> String {
        format!("{}Page", self.variants.pascal_name)
    }
}

fn route_path(path: Option<&str>, param_name: &str) -> String {
    match path.map(str::trim).filter(|p| !p.is_empty()) {
        None => format!("/{param_name}"),
        Some(p) if p.starts_with('{') && p.ends_with('}') => format!("/{param_name}/{p}"),
        Some(p) if p.starts_with('/') => p.to_string(),
        Some(p) => format!("/{p}"),
    }
}

impl Generator for PageGenerator {
    fn kind(&self) -> &'static str {
        "page"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn files(&self, ctx: &GeneratorContext) -> Result<PathContentMap> {
        let component = self.component_name();
        let dir = ctx.paths.pages.join(&component);
        let page_file = dir.join(format!("{component}.tsx"));
        let test_file = dir.join(format!("{component}.test.tsx"));

        let extra = json!({
            "outputPath": ctx.display_path(&page_file),
            "path": self.path,
        });

        let mut files = PathContentMap::new();
        files.insert(
            page_file,
            ctx.render(self.kind(), "page.tsx", PAGE, &self.name, &extra)?,
        );
        files.insert(
            test_file,
            ctx.render(self.kind(), "page.test.tsx", PAGE_TEST, &self.name, &extra)?,
        );
        Ok(files)
    }

    fn routes(&self) -> Vec<String> {
        vec![format!(
            r#"<Route path="{}" page={{{}}} name="{}" />"#,
            self.path,
            self.component_name(),
            self.variants.camel_name
        )]
    }

    fn route_names(&self) -> Vec<String> {
        vec![self.variants.camel_name.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support;
    use tempfile::tempdir;

    #[test]
    fn test_route_path_defaults() {
        assert_eq!(route_path(None, "user-profile"), "/user-profile");
        assert_eq!(route_path(Some(""), "about"), "/about");
        assert_eq!(route_path(Some("{id:Int}"), "post"), "/post/{id:Int}");
        assert_eq!(route_path(Some("/custom"), "about"), "/custom");
        assert_eq!(route_path(Some("custom"), "about"), "/custom");
    }

    #[test]
    fn test_route_declaration() {
        let page = PageGenerator::new("UserProfile", None);
        assert_eq!(
            page.routes(),
            vec![r#"<Route path="/user-profile" page={UserProfilePage} name="userProfile" />"#]
        );
        assert_eq!(page.route_names(), vec!["userProfile"]);
    }

    #[test]
    fn test_files() {
        let dir = tempdir().unwrap();
        let ctx = test_support::context(dir.path());
        let files = PageGenerator::new("about", None).files(&ctx).unwrap();

        let paths: Vec<_> = files.keys().cloned().collect();
        assert_eq!(
            paths,
            vec![
                ctx.paths.pages.join("AboutPage/AboutPage.tsx"),
                ctx.paths.pages.join("AboutPage/AboutPage.test.tsx"),
            ]
        );

        let page = &files[&paths[0]];
        assert!(page.contains("const AboutPage = () => {"));
        assert!(page.contains("<code>./web/src/pages/AboutPage/AboutPage.tsx</code>"));
        assert!(page.contains("<Link to={routes.about()}>About</Link>"));
        assert!(files[&paths[1]].contains("render(<AboutPage />)"));
    }
}
