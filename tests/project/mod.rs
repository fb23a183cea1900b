//! Project tests
//!
//! Loading workspaces from disk and reading the config file.

pub mod tests_workspace_loader;
