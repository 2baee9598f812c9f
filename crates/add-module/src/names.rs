//! Module names and the identifiers derived from them

use crate::error::ScaffoldError;

/// Every name the generated files need, derived once from the module name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNames {
    /// Raw module name, used for directories and the registration key
    pub module: String,
    /// Camel-case form (`my-module` -> `MyModule`)
    pub camel: String,
    /// C++ namespace the module class lives in
    pub namespace: String,
}

impl ModuleNames {
    /// Validate `module` and derive the other names from it
    pub fn new(module: &str) -> Result<Self, ScaffoldError> {
        validate(module)?;
        Ok(Self {
            module: module.to_string(),
            camel: camel_name(module),
            namespace: module.to_string(),
        })
    }

    /// Module class, e.g. `PerfModule`
    pub fn class_name(&self) -> String {
        format!("{}Module", self.camel)
    }

    /// Static library target, e.g. `clangTidyPerfModule`
    pub fn library_name(&self) -> String {
        format!("clangTidy{}Module", self.camel)
    }

    /// Registration source file, e.g. `PerfTidyModule.cpp`
    pub fn source_file(&self) -> String {
        format!("{}TidyModule.cpp", self.camel)
    }
}

/// Reject names that are empty or contain anything but letters and digits
pub fn validate(module: &str) -> Result<(), ScaffoldError> {
    if module.is_empty() {
        return Err(ScaffoldError::MissingModule);
    }
    if !module.chars().all(char::is_alphanumeric) {
        return Err(ScaffoldError::InvalidModuleName(module.to_string()));
    }
    Ok(())
}

/// Capitalize each hyphen-separated segment and join them.
///
/// Only the first character of a segment changes; the rest is kept as written.
pub fn camel_name(name: &str) -> String {
    name.split('-').map(capitalize).collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
