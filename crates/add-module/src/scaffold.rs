//! Lay down a new module and register it
//!
//! Each step is idempotent: existing directories and files are left as they
//! are, and the shared files only change when the module is missing from
//! them. A failing step stops the run; earlier steps are not rolled back.

use anyhow::{Context, Result};
use scaffold_core::{Layout, Status};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::names::ModuleNames;
use crate::registry;
use crate::templates::{self, RenderedFile};

/// One completed step, reported as soon as it is done
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub status: Status,
    pub path: PathBuf,
    pub note: Option<&'static str>,
}

impl Step {
    fn new(status: Status, path: PathBuf) -> Self {
        Self {
            status,
            path,
            note: None,
        }
    }

    fn with_note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }
}

/// Scaffolds one module into one clang-tidy tree
pub struct Scaffold<'a> {
    layout: &'a Layout,
    names: &'a ModuleNames,
}

impl<'a> Scaffold<'a> {
    pub fn new(layout: &'a Layout, names: &'a ModuleNames) -> Self {
        Self { layout, names }
    }

    /// Run every step in order, handing each result to `report`
    pub fn run(&self, mut report: impl FnMut(&Step)) -> Result<Vec<Step>> {
        let mut steps = Vec::new();
        let mut record = |step: Step| {
            report(&step);
            steps.push(step);
        };

        let module_dir = self.layout.module_dir(&self.names.module);
        record(ensure_dir(&module_dir)?);

        for file in [
            templates::render_cmake(self.names),
            templates::render_module_source(self.names),
        ] {
            record(write_if_missing(&module_dir, &file)?);
        }

        record(ensure_dir(&self.layout.docs_dir(&self.names.module))?);
        record(ensure_dir(&self.layout.test_dir(&self.names.module))?);

        let build_file = &self.layout.build_file;
        let patch = registry::update_build_file(build_file, self.names)?;
        record(Step::new(patch.status, build_file.clone()).with_note(patch.note));

        let header = &self.layout.force_link_header;
        let patch = registry::update_force_link_header(header, self.names)?;
        record(Step::new(patch.status, header.clone()).with_note(patch.note));

        Ok(steps)
    }
}

/// Create a single directory level; the parent has to exist already
fn ensure_dir(path: &Path) -> Result<Step> {
    if path.exists() {
        return Ok(Step::new(Status::Exists, path.to_path_buf()));
    }

    fs::create_dir(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    info!(path = %path.display(), "created directory");
    Ok(Step::new(Status::Created, path.to_path_buf()))
}

fn write_if_missing(dir: &Path, file: &RenderedFile) -> Result<Step> {
    let path = dir.join(&file.file_name);
    if path.exists() {
        return Ok(Step::new(Status::Exists, path));
    }

    fs::write(&path, &file.content)
        .with_context(|| format!("Failed to write: {}", path.display()))?;
    info!(path = %path.display(), bytes = file.content.len(), "wrote file");
    Ok(Step::new(Status::Created, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("perf");

        assert_eq!(ensure_dir(&target).unwrap().status, Status::Created);
        assert!(target.is_dir());
        assert_eq!(ensure_dir(&target).unwrap().status, Status::Exists);
    }

    #[test]
    fn test_ensure_dir_needs_parent() {
        let dir = TempDir::new().unwrap();
        let err = ensure_dir(&dir.path().join("missing/perf")).unwrap_err();
        assert!(err.to_string().contains("Failed to create directory"));
    }

    #[test]
    fn test_write_if_missing_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let file = RenderedFile {
            file_name: "CMakeLists.txt".to_string(),
            content: "generated\n".to_string(),
        };
        fs::write(dir.path().join("CMakeLists.txt"), "hand edited\n").unwrap();

        let step = write_if_missing(dir.path(), &file).unwrap();
        assert_eq!(step.status, Status::Exists);
        assert_eq!(
            fs::read_to_string(dir.path().join("CMakeLists.txt")).unwrap(),
            "hand edited\n"
        );
    }
}
