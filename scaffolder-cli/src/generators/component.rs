//! Component generator

use super::{Generator, GeneratorContext};
use crate::templates::{COMPONENT, COMPONENT_TEST};
use scaffolder::{NameVariants, PathContentMap, Result};
use serde_json::json;

/// Generates a reusable component and its test
#[derive(Debug, Clone)]
pub struct ComponentGenerator {
    name: String,
    variants: NameVariants,
}

impl ComponentGenerator {
    /// Create a component generator for `name`
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            variants: NameVariants::derive(name),
        }
    }
}

impl Generator for ComponentGenerator {
    fn kind(&self) -> &'static str {
        "component"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn files(&self, ctx: &GeneratorContext) -> Result<PathContentMap> {
        let pascal = &self.variants.pascal_name;
        let dir = ctx.paths.components.join(pascal);
        let component_file = dir.join(format!("{pascal}.tsx"));
        let test_file = dir.join(format!("{pascal}.test.tsx"));

        let extra = json!({ "outputPath": ctx.display_path(&component_file) });

        let mut files = PathContentMap::new();
        files.insert(
            component_file,
            ctx.render(self.kind(), "component.tsx", COMPONENT, &self.name, &extra)?,
        );
        files.insert(
            test_file,
            ctx.render(self.kind(), "component.test.tsx", COMPONENT_TEST, &self.name, &extra)?,
        );
        Ok(files)
    }
}
