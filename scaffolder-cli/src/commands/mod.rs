//! CLI command implementations

pub mod destroy;
pub mod generate;
pub mod init;

pub use destroy::{DestroyCommand, DestroyTarget};
pub use generate::{GenerateCommand, GenerateTarget};
pub use init::InitCommand;
