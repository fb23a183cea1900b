//! Domain constants shared across layers.

/// Extensions of documents the workspace loader picks up.
pub const ROBOT_EXTENSIONS: &[&str] = &["robot", "resource", "txt"];

/// Class name of the engine's always-imported keyword library.
pub const ROBOT_BUILT_IN: &str = "BuiltIn";

/// Module that owns the engine-reserved variables.
pub const ROBOT_BUILT_IN_MODULE: &str = "robot.libraries.BuiltIn";

/// Package prefix of the standard libraries (`Collections`, `String`, ...).
pub const STANDARD_LIBRARY_PACKAGE: &str = "robot.libraries";

/// Config file names searched in the workspace root, in order.
pub const CONFIG_FILES: &[&str] = &["robot-analysis.toml", ".robot-analysis.toml"];

/// Separator between a library namespace and a keyword (`Collections.Append To List`).
pub const NAMESPACE_SEPARATOR: char = '.';
