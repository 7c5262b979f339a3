//! Schema introspection
//!
//! The schema definition language is not parsed here. An external
//! introspector turns the schema file into a JSON data model (the DMMF shape
//! emitted by the schema toolchain), which is deserialized into [`Datamodel`].
//! Generators only need to list models and enums and look them up by name.

use crate::error::{Result, ScaffoldError};
use crate::files::read_file;
use crate::paths::ProjectPaths;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Models and enums declared by a schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datamodel {
    /// Declared models
    #[serde(default)]
    pub models: Vec<SchemaModel>,
    /// Declared enums
    #[serde(default)]
    pub enums: Vec<SchemaEnum>,
}

/// A model with its fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaModel {
    /// Model name as declared
    pub name: String,
    /// Declared fields in order
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}

/// A field of a model
// Mirrors the flags of the introspector document one to one
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    /// Field name
    pub name: String,
    /// `scalar`, `object` or `enum`
    pub kind: String,
    /// Scalar, model or enum type name
    #[serde(rename = "type")]
    pub field_type: String,
    /// Whether the field is non-nullable
    #[serde(default)]
    pub is_required: bool,
    /// Whether the field holds a list
    #[serde(default)]
    pub is_list: bool,
    /// Whether the field is the primary key
    #[serde(default)]
    pub is_id: bool,
    /// Whether the schema supplies a default value
    #[serde(default)]
    pub has_default_value: bool,
}

/// An enum with its values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaEnum {
    /// Enum name as declared
    pub name: String,
    /// Declared values in order
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

/// A single enum value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Value name
    pub name: String,
}

/// Top-level introspector document: `{ "datamodel": { ... } }`
#[derive(Deserialize)]
struct DmmfDocument {
    datamodel: Datamodel,
}

impl Datamodel {
    /// Parse an introspector JSON document
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Schema`] if the document is malformed.
    pub fn from_dmmf_json(json: &str) -> Result<Self> {
        serde_json::from_str::<DmmfDocument>(json)
            .map(|doc| doc.datamodel)
            .map_err(|e| ScaffoldError::Schema(format!("invalid data model document: {e}")))
    }

    /// Look up a model by exact name
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::LookupNotFound`] if no model has that name.
    pub fn model(&self, name: &str) -> Result<&SchemaModel> {
        self.models
            .iter()
            .find(|model| model.name == name)
            .ok_or_else(|| ScaffoldError::LookupNotFound {
                kind: "model",
                name: name.to_string(),
            })
    }

    /// Look up an enum by exact name
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::LookupNotFound`] if no enum has that name.
    pub fn enumeration(&self, name: &str) -> Result<&SchemaEnum> {
        self.enums
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| ScaffoldError::LookupNotFound {
                kind: "enum",
                name: name.to_string(),
            })
    }

    /// Names of all declared models
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|model| model.name.as_str())
    }

    /// Names of all declared enums
    pub fn enum_names(&self) -> impl Iterator<Item = &str> {
        self.enums.iter().map(|e| e.name.as_str())
    }
}

impl SchemaModel {
    /// Scalar and enum fields, skipping relations
    pub fn scalar_fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.iter().filter(|field| field.kind != "object")
    }

    /// The primary key field, if any
    #[must_use]
    pub fn id_field(&self) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.is_id)
    }
}

/// Turns schema source text into a [`Datamodel`]
pub trait SchemaIntrospector {
    /// Introspect `schema_source`
    ///
    /// # Errors
    ///
    /// Returns an error if the introspector fails or its output is malformed.
    fn introspect(&self, schema_source: &str) -> Result<Datamodel>;
}

/// Introspector that pipes the schema to an external command
///
/// The command receives the schema text on stdin and must print the JSON
/// data model document on stdout.
#[derive(Debug, Clone)]
pub struct CommandIntrospector {
    command: String,
    args: Vec<String>,
    cwd: PathBuf,
}

impl CommandIntrospector {
    /// Create an introspector running `command args...` from `cwd`
    pub fn new(command: impl Into<String>, args: Vec<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            args,
            cwd: cwd.into(),
        }
    }

    fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl SchemaIntrospector for CommandIntrospector {
    fn introspect(&self, schema_source: &str) -> Result<Datamodel> {
        let failed = |message: String| ScaffoldError::CommandFailed {
            command: self.command_line(),
            message,
        };

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .current_dir(&self.cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| failed(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(schema_source.as_bytes())
                .map_err(|e| failed(e.to_string()))?;
        }

        let output = child.wait_with_output().map_err(|e| failed(e.to_string()))?;
        if !output.status.success() {
            return Err(failed(format!(
                "{}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Datamodel::from_dmmf_json(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Introspector that reads a previously generated data model document
#[derive(Debug, Clone)]
pub struct PrecomputedDmmf {
    path: PathBuf,
}

impl PrecomputedDmmf {
    /// Read the document at `path` on every introspection
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SchemaIntrospector for PrecomputedDmmf {
    fn introspect(&self, _schema_source: &str) -> Result<Datamodel> {
        Datamodel::from_dmmf_json(&read_file(&self.path)?)
    }
}

/// Read the project schema file and introspect it
///
/// # Errors
///
/// Returns an error if the schema file cannot be read or introspection fails.
pub fn load_datamodel(
    paths: &ProjectPaths,
    introspector: &dyn SchemaIntrospector,
) -> Result<Datamodel> {
    load_datamodel_from(&paths.schema, introspector)
}

fn load_datamodel_from(schema: &Path, introspector: &dyn SchemaIntrospector) -> Result<Datamodel> {
    let source = read_file(schema)?;
    let datamodel = introspector.introspect(&source)?;
    tracing::debug!(
        schema = %schema.display(),
        models = datamodel.models.len(),
        enums = datamodel.enums.len(),
        "introspected schema"
    );
    Ok(datamodel)
}
