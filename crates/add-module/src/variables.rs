//! Template variable handling
//!
//! Provides variable substitution using {{PLACEHOLDER}} syntax.
//! The values always come from a [`ModuleNames`] record.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::names::ModuleNames;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Z_][A-Z0-9_]*)\}\}").unwrap());

/// Template variables container
#[derive(Debug, Clone)]
pub struct Variables {
    /// Variable name -> value mapping
    vars: HashMap<String, String>,
}

impl Variables {
    /// Populate every variable the module templates use
    pub fn for_module(names: &ModuleNames) -> Self {
        let mut vars = HashMap::new();

        vars.insert("MODULE".to_string(), names.module.clone());
        vars.insert("NAMESPACE".to_string(), names.namespace.clone());
        vars.insert("CLASS_NAME".to_string(), names.class_name());
        vars.insert("LIBRARY_NAME".to_string(), names.library_name());
        vars.insert("SOURCE_FILE".to_string(), names.source_file());

        Self { vars }
    }

    /// Set a variable value
    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_uppercase(), value.to_string());
    }

    /// Get a variable value
    pub fn get(&self, key: &str) -> Option<&String> {
        self.vars.get(&key.to_uppercase())
    }

    /// Replace all {{PLACEHOLDER}} patterns in a string
    pub fn substitute(&self, content: &str) -> String {
        PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let key = &caps[1];
                self.vars
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| format!("{{{{{}}}}}", key))
            })
            .to_string()
    }

    /// Find all variables used in a string
    pub fn find_used_variables(content: &str) -> Vec<String> {
        let mut vars: Vec<String> = PLACEHOLDER
            .captures_iter(content)
            .map(|cap| cap[1].to_string())
            .collect();

        vars.sort();
        vars.dedup();
        vars
    }
}
