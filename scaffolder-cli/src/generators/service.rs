//! Service generator
//!
//! Services are generated from a schema model: `scaffolder generate service
//! posts` looks up the `Post` model and writes `api/src/services/posts/posts.ts`.

use super::{Generator, GeneratorContext};
use crate::templates::{SERVICE, SERVICE_TEST};
use scaffolder::schema::load_datamodel;
use scaffolder::{NameVariants, PathContentMap, Result};
use serde_json::json;

/// Generates CRUD data access for one model
#[derive(Debug, Clone)]
pub struct ServiceGenerator {
    name: String,
    variants: NameVariants,
}

impl ServiceGenerator {
    /// Create a service generator for the model called `name`
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            variants: NameVariants::derive(name),
        }
    }
}

impl Generator for ServiceGenerator {
    fn kind(&self) -> &'static str {
        "service"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn files(&self, ctx: &GeneratorContext) -> Result<PathContentMap> {
        let datamodel = load_datamodel(&ctx.paths, ctx.introspector.as_ref())?;
        let model = datamodel.model(&self.variants.singular_pascal_name)?;

        let fields: Vec<&str> = model.scalar_fields().map(|f| f.name.as_str()).collect();
        let extra = json!({
            "modelName": model.name,
            "idName": model.id_field().map_or("id", |f| f.name.as_str()),
            "fieldCount": fields.len(),
            "fields": fields,
        });

        let plural = &self.variants.plural_camel_name;
        let dir = ctx.paths.services.join(plural);

        let mut files = PathContentMap::new();
        files.insert(
            dir.join(format!("{plural}.ts")),
            ctx.render(self.kind(), "service.ts", SERVICE, &self.name, &extra)?,
        );
        files.insert(
            dir.join(format!("{plural}.test.ts")),
            ctx.render(self.kind(), "service.test.ts", SERVICE_TEST, &self.name, &extra)?,
        );
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{self, FixedSchema};
    use scaffolder::ScaffoldError;
    use std::fs;
    use tempfile::tempdir;

    const DMMF: &str = r#"{
        "datamodel": {
            "models": [{
                "name": "Post",
                "fields": [
                    {"name": "slug", "kind": "scalar", "type": "String", "isRequired": true, "isList": false, "isId": true, "hasDefaultValue": false},
                    {"name": "title", "kind": "scalar", "type": "String", "isRequired": true, "isList": false, "isId": false, "hasDefaultValue": false},
                    {"name": "author", "kind": "object", "type": "User", "isRequired": true, "isList": false, "isId": false, "hasDefaultValue": false}
                ]
            }],
            "enums": []
        }
    }"#;

    fn context(base: &std::path::Path) -> super::GeneratorContext {
        fs::create_dir_all(base.join("api/db")).unwrap();
        fs::write(base.join("api/db/schema.prisma"), "model Post {}").unwrap();
        let mut ctx = test_support::context(base);
        ctx.introspector = Box::new(FixedSchema(DMMF));
        ctx
    }

    #[test]
    fn test_files_from_model() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());
        let files = ServiceGenerator::new("posts").files(&ctx).unwrap();

        let service = &files[&ctx.paths.services.join("posts/posts.ts")];
        assert!(service.contains("export const posts = () => {"));
        assert!(service.contains("export const post = ({ slug }) => {"));
        assert!(service.contains("export const createPost = ({ input }) => {"));

        let test = &files[&ctx.paths.services.join("posts/posts.test.ts")];
        assert!(test.contains("const POST_FIELDS = ['slug', 'title']"));
        assert!(test.contains("toHaveLength(2)"));
    }

    #[test]
    fn test_unknown_model() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());
        let err = ServiceGenerator::new("comments").files(&ctx).unwrap_err();

        assert!(matches!(err, ScaffoldError::LookupNotFound { .. }));
        assert_eq!(
            err.to_string(),
            "No schema definition found for `Comment` in schema.prisma file"
        );
    }

    #[test]
    fn test_missing_schema_file() {
        let dir = tempdir().unwrap();
        let ctx = test_support::context(dir.path());
        assert!(ServiceGenerator::new("posts").files(&ctx).is_err());
    }
}
