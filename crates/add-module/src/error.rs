//! Errors the scaffolder reports before touching anything

use thiserror::Error;

/// Usage problems, detected before any filesystem mutation.
///
/// Filesystem failures are not listed here: they travel as `anyhow::Error`
/// with the offending path attached as context.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScaffoldError {
    #[error("Module must be specified.")]
    MissingModule,

    #[error("Module name must be alphanumeric: {0}")]
    InvalidModuleName(String),
}
