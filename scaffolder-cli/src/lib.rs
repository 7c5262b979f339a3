//! scaffolder CLI library

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod generators;
pub mod templates;

pub use generators::{
    destroy_tasks, generate_tasks, registers_new_routes, ComponentGenerator, Generator,
    GeneratorContext, PageGenerator, ServiceGenerator,
};
pub use templates::TemplateSet;
