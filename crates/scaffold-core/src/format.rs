//! Formatting utilities

use std::fmt;
use std::path::Path;

/// What a step did to the file or directory it owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Created,
    Exists,
    Updated,
    Unchanged,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Exists => "exists",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a status line, labels padded so paths line up
///
/// `  created:   perf/CMakeLists.txt`
pub fn status_line(status: Status, path: &Path, note: Option<&str>) -> String {
    let label = format!("{}:", status.as_str());
    match note {
        Some(note) => format!("  {:<10} {} ({})", label, path.display(), note),
        None => format!("  {:<10} {}", label, path.display()),
    }
}
