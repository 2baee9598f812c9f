//! The two shared files every module has to be listed in
//!
//! - the clang-tidy `CMakeLists.txt`: one `add_subdirectory(..)` line and
//!   one library name inside `set(ALL_CLANG_TIDY_CHECKS ..)`
//! - `ClangTidyForceLinker.h`: one anchor block, so the module's static
//!   registration is linked into the binary

use anyhow::{Context, Result};
use scaffold_core::Status;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::lines::{Anchor, Guard, LineList, LineMatch, MergeOutcome, Region};
use crate::names::ModuleNames;

const ALL_CHECKS: LineMatch = LineMatch::Prefix("set(ALL_CLANG_TIDY_CHECKS");
const ANCHOR_COMMENT: LineMatch = LineMatch::Prefix("// This anchor ");

/// `add_subdirectory(<module>)` lines, up to the library list
pub const SUBDIRECTORIES: Region = Region {
    name: "subdirectories",
    anchor: Anchor::At(LineMatch::Prefix("add_subdirectory(")),
    end: ALL_CHECKS,
    guard: Some(Guard {
        open: LineMatch::Prefix("if("),
        close: LineMatch::Prefix("endif()"),
    }),
    entries: None,
};

/// Library names inside `set(ALL_CLANG_TIDY_CHECKS ..)`
pub const LIBRARIES: Region = Region {
    name: "libraries",
    anchor: Anchor::After(ALL_CHECKS),
    end: LineMatch::Contains(")"),
    guard: None,
    entries: None,
};

/// Anchor blocks in the force-link header
pub const ANCHORS: Region = Region {
    name: "anchors",
    anchor: Anchor::At(ANCHOR_COMMENT),
    end: LineMatch::Prefix("} // namespace"),
    guard: Some(Guard {
        open: LineMatch::Prefix("#if"),
        close: LineMatch::Prefix("#endif"),
    }),
    entries: Some(ANCHOR_COMMENT),
};

pub fn subdirectory_line(names: &ModuleNames) -> String {
    format!("add_subdirectory({})\n", names.module)
}

pub fn library_line(names: &ModuleNames) -> String {
    format!("  {}\n", names.library_name())
}

/// The five lines that pull a module's anchor into the link
pub fn anchor_block(names: &ModuleNames) -> Vec<String> {
    let class = names.class_name();
    vec![
        format!("// This anchor is used to force the linker to link the {}.\n", class),
        format!("extern volatile int {}AnchorSource;\n", class),
        format!("static int LLVM_ATTRIBUTE_UNUSED {}AnchorDestination =\n", class),
        format!("    {}AnchorSource;\n", class),
        "\n".to_string(),
    ]
}

/// What patching one shared file did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patch {
    pub status: Status,
    /// Which entries went in, for the status line
    pub note: &'static str,
}

/// A shared file loaded for patching
///
/// The whole file is read up front; nothing is written until [`commit`],
/// and then only if the content changed.
///
/// [`commit`]: SharedFile::commit
#[derive(Debug)]
pub struct SharedFile {
    path: PathBuf,
    original: String,
    lines: LineList,
}

impl SharedFile {
    pub fn open(path: &Path) -> Result<Self> {
        let original = fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {}", path.display()))?;
        let lines = LineList::parse(&original);
        Ok(Self {
            path: path.to_path_buf(),
            original,
            lines,
        })
    }

    pub fn lines_mut(&mut self) -> &mut LineList {
        &mut self.lines
    }

    /// Write the file back if it changed
    pub fn commit(self) -> Result<Status> {
        let content = self.lines.render();
        if content == self.original {
            debug!(path = %self.path.display(), "content unchanged, not writing");
            return Ok(Status::Unchanged);
        }

        write_atomic(&self.path, &content)?;
        info!(path = %self.path.display(), "rewrote shared file");
        Ok(Status::Updated)
    }
}

/// Replace the file behind `path` with `content` through a sibling temp
/// file and a rename.
///
/// A symlinked `path` is followed: the link target is rewritten and the
/// link itself stays in place.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let target = fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve: {}", path.display()))?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in: {}", dir.display()))?;

    tmp.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write: {}", tmp.path().display()))?;

    // Keep the original file's mode instead of the temp file's 0600
    let perms = fs::metadata(&target)
        .with_context(|| format!("Failed to stat: {}", target.display()))?
        .permissions();
    fs::set_permissions(tmp.path(), perms)
        .with_context(|| format!("Failed to set permissions: {}", tmp.path().display()))?;

    tmp.persist(&target)
        .with_context(|| format!("Failed to replace: {}", target.display()))?;
    Ok(())
}

/// Add the module's subdirectory and library to the clang-tidy build file
pub fn update_build_file(path: &Path, names: &ModuleNames) -> Result<Patch> {
    let mut file = SharedFile::open(path)?;
    let lines = file.lines_mut();

    let subdirs = lines.merge(0, &SUBDIRECTORIES, &[subdirectory_line(names)]);
    let libs = lines.merge(subdirs.resume, &LIBRARIES, &[library_line(names)]);

    debug!(
        subdirectories = ?subdirs.outcome,
        libraries = ?libs.outcome,
        "merged build file regions"
    );

    let note = match (subdirs.outcome, libs.outcome) {
        (MergeOutcome::Inserted, MergeOutcome::Inserted) => "subdirectory and library added",
        (MergeOutcome::Inserted, MergeOutcome::AlreadyPresent) => "subdirectory added",
        (MergeOutcome::AlreadyPresent, MergeOutcome::Inserted) => "library added",
        (MergeOutcome::AlreadyPresent, MergeOutcome::AlreadyPresent) => "module already included",
    };

    Ok(Patch {
        status: file.commit()?,
        note,
    })
}

/// Add the module's anchor block to the force-link header
pub fn update_force_link_header(path: &Path, names: &ModuleNames) -> Result<Patch> {
    let mut file = SharedFile::open(path)?;
    let merge = file.lines_mut().merge(0, &ANCHORS, &anchor_block(names));

    let note = match merge.outcome {
        MergeOutcome::Inserted => "anchor added",
        MergeOutcome::AlreadyPresent => "module already has forced link",
    };

    Ok(Patch {
        status: file.commit()?,
        note,
    })
}
