//! Route registration in the routes file
//!
//! Routes live in a source file as one self-closing element per line inside
//! a `<Router>` container:
//!
//! ```text
//! <Router>
//!   <Route path="/posts" page={PostsPage} name="posts" />
//!   <Route notfound page={NotFoundPage} />
//! </Router>
//! ```
//!
//! Patching is plain text substitution. A declaration is only recognized when
//! it fits on a single line; the first element carrying a given `name` is the
//! one that gets removed.

use crate::error::Result;
use crate::files::{read_file, write_file, WriteOptions};
use regex::{NoExpand, Regex};
use std::path::Path;
use std::sync::LazyLock;

static ROUTER_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\s*)<Router>").expect("Invalid regex"));

/// A change to the routes file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePatch {
    /// Route declarations to insert, in their final order
    Add(Vec<String>),
    /// Route names whose declarations should be removed
    Remove(Vec<String>),
}

impl RoutePatch {
    /// Apply the patch to routes file content
    #[must_use]
    pub fn apply(&self, content: &str) -> String {
        match self {
            Self::Add(routes) => add_routes(content, routes),
            Self::Remove(names) => remove_routes(content, names),
        }
    }
}

/// Insert route declarations right after the opening `<Router>` tag
///
/// Declarations already present verbatim anywhere in `content` are skipped.
/// Each new line reuses the indentation of the `<Router>` tag plus two spaces,
/// and the inserted declarations keep the order of `routes`.
///
/// # Examples
///
/// ```
/// # use scaffolder::router::add_routes;
/// let content = "(\n  <Router>\n  </Router>";
/// let routes = vec![r#"<Route path="/a" name="a" />"#.to_string()];
/// assert_eq!(
///     add_routes(content, &routes),
///     "(\n  <Router>\n    <Route path=\"/a\" name=\"a\" />\n  </Router>"
/// );
/// ```
#[must_use]
pub fn add_routes(content: &str, routes: &[String]) -> String {
    routes.iter().rev().fold(content.to_string(), |content, route| {
        if content.contains(route.as_str()) {
            return content;
        }

        let Some(captures) = ROUTER_OPEN.captures(&content) else {
            tracing::warn!("no <Router> tag found, route not added");
            return content;
        };
        let (Some(tag), Some(whitespace)) = (captures.get(0), captures.get(1)) else {
            return content;
        };

        let whitespace = whitespace.as_str();
        format!(
            "{}{whitespace}<Router>{whitespace}  {route}{}",
            &content[..tag.start()],
            &content[tag.end()..]
        )
    })
}

/// Remove the first single-line `<Route ... />` whose `name` matches, per name
///
/// Names without a matching declaration leave the content unchanged.
///
/// # Examples
///
/// ```
/// # use scaffolder::router::remove_routes;
/// let content = "<Router>\n  <Route path=\"/a\" name=\"a\" />\n</Router>";
/// assert_eq!(remove_routes(content, &["a".to_string()]), "<Router>\n</Router>");
/// ```
#[must_use]
pub fn remove_routes(content: &str, names: &[String]) -> String {
    names.iter().fold(content.to_string(), |content, name| {
        let pattern = format!(r#"\s*<Route[^>\n]*name="{}"[^>\n]*/>"#, regex::escape(name));
        match Regex::new(&pattern) {
            Ok(matcher) => matcher.replace(&content, NoExpand("")).into_owned(),
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "cannot build route matcher");
                content
            }
        }
    })
}

/// Apply `patch` to the routes file in place
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn patch_routes_file(routes_file: &Path, patch: &RoutePatch) -> Result<()> {
    let content = read_file(routes_file)?;
    let patched = patch.apply(&content);
    write_file(routes_file, &patched, WriteOptions::overwrite())
}

/// Register `routes` in the routes file
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn add_routes_to_router(routes_file: &Path, routes: &[String]) -> Result<()> {
    patch_routes_file(routes_file, &RoutePatch::Add(routes.to_vec()))
}

/// Remove the routes called `names` from the routes file
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn remove_routes_from_router(routes_file: &Path, names: &[String]) -> Result<()> {
    patch_routes_file(routes_file, &RoutePatch::Remove(names.to_vec()))
}
