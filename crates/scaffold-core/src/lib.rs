//! scaffold-core - Shared functionality for the clang-tidy scaffolding tools
//!
//! Knows where things live in a clang-tidy source checkout and how to
//! announce what was done to them.

pub mod config;
pub mod format;
pub mod paths;

pub use config::Config;
pub use format::Status;
pub use paths::Layout;
