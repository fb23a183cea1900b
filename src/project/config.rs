//! Analysis options and the config file they are read from.
//!
//! ```toml
//! [options]
//! capitalize_keywords = true
//! allow_transitive_imports = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::base::constants::CONFIG_FILES;

/// Options that change analysis results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotOptions {
    /// Offer keyword completions with every word capitalized.
    pub capitalize_keywords: bool,
    /// Follow the imports of imported resources.
    pub allow_transitive_imports: bool,
}

impl Default for RobotOptions {
    fn default() -> Self {
        Self {
            capitalize_keywords: true,
            allow_transitive_imports: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigToml {
    options: RobotOptions,
}

impl RobotOptions {
    /// Parse the contents of a config file.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        let raw: ConfigToml = toml::from_str(text)?;
        Ok(raw.options)
    }

    /// Options from the first config file in `root`.
    ///
    /// A missing file means defaults. An unreadable or malformed file is
    /// logged and also yields defaults.
    pub fn load(root: &Path) -> Self {
        let Some(path) = CONFIG_FILES
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.is_file())
        else {
            return Self::default();
        };

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "failed to read config file");
                return Self::default();
            }
        };
        match Self::from_toml(&text) {
            Ok(options) => {
                tracing::debug!(path = %path.display(), ?options, "loaded config file");
                options
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "invalid config file, using defaults");
                Self::default()
            }
        }
    }
}
