//! The project version, read once from a file next to the docs directory.
//!
//! ```text
//! project/
//! ├── .version          ← read verbatim
//! └── docs/
//!     └── conf.toml
//! ```
//!
//! The same string is exposed to the engine as both `version` and `release`.
//! Contents are kept raw, trailing newline included.

use crate::config::ConfigError;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the version file, relative to the config file's directory.
pub const VERSION_FILE: &str = "../.version";

/// Raw contents of the version file. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VersionString(String);

impl VersionString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path of the version file for a config living in `config_dir`.
pub fn version_path(config_dir: &Path) -> PathBuf {
    config_dir.join(VERSION_FILE)
}

/// Read the version file for a config living in `config_dir`.
///
/// Missing or unreadable files fail with [`ConfigError::VersionFile`];
/// a file holding only whitespace fails with [`ConfigError::EmptyVersion`].
pub fn read_version(config_dir: &Path) -> Result<VersionString, ConfigError> {
    let path = version_path(config_dir);
    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::VersionFile {
        path: path.clone(),
        source,
    })?;
    if raw.trim().is_empty() {
        return Err(ConfigError::EmptyVersion(path));
    }
    Ok(VersionString(raw))
}
