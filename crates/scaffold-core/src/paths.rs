//! Paths inside a clang-tidy source checkout

use crate::config::Config;
use std::path::{Path, PathBuf};

/// Where a module's pieces live, resolved against the clang-tidy directory
#[derive(Debug, Clone)]
pub struct Layout {
    /// The clang-tidy source directory (holds one directory per module)
    pub root: PathBuf,
    /// Parent of the per-module docs directories
    pub docs: PathBuf,
    /// Parent of the per-module test directories
    pub tests: PathBuf,
    /// Shared build file
    pub build_file: PathBuf,
    /// Shared force-link header
    pub force_link_header: PathBuf,
}

impl Layout {
    pub fn new(root: &Path, config: &Config) -> Self {
        Self {
            root: root.to_path_buf(),
            docs: root.join(&config.docs_dir),
            tests: root.join(&config.test_dir),
            build_file: root.join(&config.build_file),
            force_link_header: root.join(&config.force_link_header),
        }
    }

    /// Directory holding the module's sources
    pub fn module_dir(&self, module: &str) -> PathBuf {
        self.root.join(module)
    }

    /// Directory for the module's check documentation
    pub fn docs_dir(&self, module: &str) -> PathBuf {
        self.docs.join(module)
    }

    /// Directory for the module's lit tests
    pub fn test_dir(&self, module: &str) -> PathBuf {
        self.tests.join(module)
    }
}
