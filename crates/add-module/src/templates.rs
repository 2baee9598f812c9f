//! The two files generated inside a new module directory

use crate::names::ModuleNames;
use crate::variables::Variables;

/// Width the banner's trailing dashes pad the file name to
const BANNER_WIDTH: usize = 51;

const CMAKE_TEMPLATE: &str = r#"set(LLVM_LINK_COMPONENTS
  FrontendOpenMP
  Support
  )

add_clang_library({{LIBRARY_NAME}} STATIC
  {{SOURCE_FILE}}

  LINK_LIBS
  clangTidy
  clangTidyUtils

  DEPENDS
  omp_gen
  ClangDriverOptions
  )

clang_target_link_libraries({{LIBRARY_NAME}}
  PRIVATE
  clangAnalysis
  clangAST
  clangASTMatchers
  clangBasic
  clangLex
  )
"#;

const MODULE_SOURCE_TEMPLATE: &str = r#"{{BANNER}}
//
// Part of the LLVM Project, under the Apache License v2.0 with LLVM Exceptions.
// See https://llvm.org/LICENSE.txt for license information.
// SPDX-License-Identifier: Apache-2.0 WITH LLVM-exception
//
//===----------------------------------------------------------------------===//

#include "../ClangTidy.h"
#include "../ClangTidyModule.h"
#include "../ClangTidyModuleRegistry.h"

namespace clang::tidy {
namespace {{NAMESPACE}} {

class {{CLASS_NAME}} : public ClangTidyModule {
public:
  void addCheckFactories(ClangTidyCheckFactories &CheckFactories) override {
  }
};

} // namespace {{NAMESPACE}}

// Register the {{CLASS_NAME}} using this statically initialized variable.
static ClangTidyModuleRegistry::Add<{{NAMESPACE}}::{{CLASS_NAME}}>
    X("{{MODULE}}-module", "Adds {{MODULE}}-specific lint checks.");

// This anchor is used to force the linker to link in the generated object file
// and thus register the {{CLASS_NAME}}.
volatile int {{CLASS_NAME}}AnchorSource = 0;

} // namespace clang::tidy
"#;

/// A file to create in the module directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// File name relative to the module directory
    pub file_name: String,
    pub content: String,
}

/// The module's own `CMakeLists.txt`
pub fn render_cmake(names: &ModuleNames) -> RenderedFile {
    let vars = Variables::for_module(names);
    RenderedFile {
        file_name: "CMakeLists.txt".to_string(),
        content: vars.substitute(CMAKE_TEMPLATE),
    }
}

/// The `<Camel>TidyModule.cpp` registration source
pub fn render_module_source(names: &ModuleNames) -> RenderedFile {
    let file_name = names.source_file();
    let mut vars = Variables::for_module(names);
    vars.set("BANNER", &banner(&file_name));
    RenderedFile {
        content: vars.substitute(MODULE_SOURCE_TEMPLATE),
        file_name,
    }
}

/// `//===--- Foo.cpp - clang-tidy -------...-===//`
fn banner(file_name: &str) -> String {
    let dashes = "-".repeat(BANNER_WIDTH.saturating_sub(file_name.chars().count()));
    format!("//===--- {} - clang-tidy {}-===//", file_name, dashes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perf() -> ModuleNames {
        ModuleNames::new("perf").unwrap()
    }

    #[test]
    fn test_cmake_substitutions() {
        let file = render_cmake(&perf());
        assert_eq!(file.file_name, "CMakeLists.txt");
        assert!(file.content.starts_with("set(LLVM_LINK_COMPONENTS\n"));
        assert!(file
            .content
            .contains("add_clang_library(clangTidyPerfModule STATIC\n  PerfTidyModule.cpp\n"));
        assert!(file
            .content
            .contains("clang_target_link_libraries(clangTidyPerfModule\n  PRIVATE\n"));
        assert!(!file.content.contains("{{"));
    }

    #[test]
    fn test_module_source_substitutions() {
        let file = render_module_source(&perf());
        assert_eq!(file.file_name, "PerfTidyModule.cpp");

        let first = file.content.lines().next().unwrap();
        assert_eq!(
            first,
            format!("//===--- PerfTidyModule.cpp - clang-tidy {}-===//", "-".repeat(33))
        );
        assert_eq!(first.len(), 80);

        assert!(file.content.contains("namespace perf {\n"));
        assert!(file.content.contains("class PerfModule : public ClangTidyModule {\n"));
        assert!(file.content.contains("} // namespace perf\n"));
        assert!(file
            .content
            .contains("static ClangTidyModuleRegistry::Add<perf::PerfModule>\n"));
        assert!(file
            .content
            .contains("    X(\"perf-module\", \"Adds perf-specific lint checks.\");\n"));
        assert!(file.content.contains("volatile int PerfModuleAnchorSource = 0;\n"));
        assert!(file.content.ends_with("} // namespace clang::tidy\n"));
        assert!(!file.content.contains("{{"));
    }

    #[test]
    fn test_banner_never_goes_negative() {
        let long = "A".repeat(60);
        assert_eq!(banner(&long), format!("//===--- {} - clang-tidy -===//", long));
    }

    #[test]
    fn test_banner_pads_by_characters() {
        let file = render_module_source(&ModuleNames::new("café").unwrap());
        assert_eq!(file.file_name, "CaféTidyModule.cpp");
        let first = file.content.lines().next().unwrap();
        assert_eq!(first.chars().count(), 80);
        assert!(first.ends_with(&format!(" - clang-tidy {}-===//", "-".repeat(33))));
    }

    #[test]
    fn test_templates_only_use_known_variables() {
        let vars = Variables::for_module(&perf());
        for template in [CMAKE_TEMPLATE, MODULE_SOURCE_TEMPLATE] {
            for name in Variables::find_used_variables(template) {
                assert!(
                    name == "BANNER" || vars.get(&name).is_some(),
                    "unknown placeholder {}",
                    name
                );
            }
        }
    }
}
