//! add-module - Scaffold a new clang-tidy module
//!
//! Creates the module directory with its `CMakeLists.txt` and registration
//! source, the matching docs and test directories, and lists the module in
//! the clang-tidy build file and force-link header.
//!
//! Safe to re-run: anything already in place is left alone.

pub mod error;
pub mod lines;
pub mod names;
pub mod registry;
pub mod scaffold;
pub mod templates;
pub mod variables;

pub use error::ScaffoldError;
pub use names::ModuleNames;
pub use scaffold::{Scaffold, Step};
