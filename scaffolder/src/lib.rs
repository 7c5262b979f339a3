//! Scaffolder core library
//!
//! Building blocks for generators that scaffold source files into a web
//! application project:
//!
//! - [`names`] derives the casing and pluralization variants of an entity name
//! - [`template`] renders file templates and pipes them through [`format`]
//! - [`files`] resolves source files regardless of their script extension
//! - [`tasks`] turns a path to content mapping into sequential write/delete tasks
//! - [`router`] registers and unregisters route declarations in the routes file
//!
//! Project layout comes from [`paths::ProjectPaths`], which is resolved once
//! at startup and passed to every component that needs it.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod files;
pub mod format;
pub mod names;
pub mod observability;
pub mod paths;
pub mod process;
pub mod router;
pub mod schema;
pub mod tasks;
pub mod template;

pub use config::ScaffolderConfig;
pub use error::{Result, ScaffoldError};
pub use files::{WriteOptions, SOURCE_EXTENSIONS};
pub use names::NameVariants;
pub use paths::ProjectPaths;
pub use tasks::{DisplayMode, FileTask, PathContentMap, RunReport, TaskRunner};
pub use template::TemplateMaterializer;
