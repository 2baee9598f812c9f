//! Configuration for the scaffolding tools
//!
//! Every field has a default matching the stock clang-tidy tree, so a
//! missing config file is the common case.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up inside the clang-tidy source directory
pub const LOCAL_CONFIG_FILE: &str = ".add-module.json";

/// Layout overrides, all relative to the clang-tidy source directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Parent of the per-module docs directories
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Parent of the per-module test directories
    #[serde(default = "default_test_dir")]
    pub test_dir: PathBuf,

    /// Shared build file listing subdirectories and libraries
    #[serde(default = "default_build_file")]
    pub build_file: String,

    /// Header holding the force-link anchors
    #[serde(default = "default_force_link_header")]
    pub force_link_header: String,
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("../docs/clang-tidy/checks")
}

fn default_test_dir() -> PathBuf {
    PathBuf::from("../test/clang-tidy/checkers")
}

fn default_build_file() -> String {
    "CMakeLists.txt".to_string()
}

fn default_force_link_header() -> String {
    "ClangTidyForceLinker.h".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            test_dir: default_test_dir(),
            build_file: default_build_file(),
            force_link_header: default_force_link_header(),
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults if it is missing
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the config for a clang-tidy directory.
    ///
    /// An explicit path wins, then `<root>/.add-module.json`, then the
    /// per-user config file.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local = root.join(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Self::load(&local);
        }

        match Self::user_config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Per-user config file (~/.config/add-module/config.json)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("add-module").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.build_file, "CMakeLists.txt");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(LOCAL_CONFIG_FILE),
            r#"{ "docs_dir": "docs/checks" }"#,
        )
        .unwrap();

        let config = Config::discover(dir.path(), None).unwrap();
        assert_eq!(config.docs_dir, PathBuf::from("docs/checks"));
        assert_eq!(config.test_dir, PathBuf::from("../test/clang-tidy/checkers"));
        assert_eq!(config.force_link_header, "ClangTidyForceLinker.h");
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(LOCAL_CONFIG_FILE),
            r#"{ "build_file": "local.txt" }"#,
        )
        .unwrap();
        let explicit = dir.path().join("explicit.json");
        std::fs::write(&explicit, r#"{ "build_file": "explicit.txt" }"#).unwrap();

        let config = Config::discover(dir.path(), Some(&explicit)).unwrap();
        assert_eq!(config.build_file, "explicit.txt");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
