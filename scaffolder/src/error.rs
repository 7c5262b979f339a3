//! Error types and error handling

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Scaffolding error type
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// A model or enum was requested that the schema does not define
    #[error("No schema definition found for `{name}` in schema.prisma file")]
    LookupNotFound {
        /// Kind of definition that was looked up (`model` or `enum`)
        kind: &'static str,
        /// Requested name
        name: String,
    },

    /// A write target exists and overwriting was not permitted
    #[error("{} already exists.", .0.display())]
    AlreadyExists(PathBuf),

    /// The current directory is not inside a recognized project
    #[error("{0}")]
    ProjectResolution(String),

    /// File system error with the offending path
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path being read, written or removed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Template rendering failed
    #[error("Failed to render template {name}: {source}")]
    Template {
        /// Template name or path
        name: String,
        /// Underlying renderer error
        #[source]
        source: Box<handlebars::RenderError>,
    },

    /// The external source formatter rejected its input
    #[error("Formatter error: {0}")]
    Format(String),

    /// The schema introspector output could not be used
    #[error("Schema error: {0}")]
    Schema(String),

    /// An external command exited non-zero or could not be started
    #[error("Command `{command}` failed: {message}")]
    CommandFailed {
        /// Command line that was executed
        command: String,
        /// Exit status or spawn error
        message: String,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl ScaffoldError {
    /// Wrap an I/O error together with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is the "target already exists" write refusal
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_not_found_message_names_entity() {
        let err = ScaffoldError::LookupNotFound {
            kind: "model",
            name: "Post".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No schema definition found for `Post` in schema.prisma file"
        );
    }

    #[test]
    fn test_already_exists_message() {
        let err = ScaffoldError::AlreadyExists(PathBuf::from("out/Foo.ts"));
        assert_eq!(err.to_string(), "out/Foo.ts already exists.");
        assert!(err.is_already_exists());
    }
}
