//! Project-level concerns: options and loading documents from disk.

pub mod config;
mod error;
pub mod file_loader;
pub mod workspace_loader;

pub use config::RobotOptions;
pub use error::LoadError;
pub use workspace_loader::WorkspaceLoader;
