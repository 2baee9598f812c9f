//! add-module - Scaffold a new clang-tidy module
//!
//! Usage: add-module [--description TEXT] [--root DIR] <MODULE>

use add_module::{ModuleNames, Scaffold, ScaffoldError};
use anyhow::Result;
use clap::{CommandFactory, Parser};
use scaffold_core::{format::status_line, Config, Layout};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable naming the clang-tidy source directory
const ROOT_ENV: &str = "CLANG_TIDY_SOURCE_DIR";

#[derive(Parser)]
#[command(name = "add-module")]
#[command(about = "Scaffold a new clang-tidy module and wire it into the build")]
#[command(version)]
#[command(after_help = r#"CREATES:
    <root>/<module>/CMakeLists.txt
    <root>/<module>/<Module>TidyModule.cpp
    <root>/../docs/clang-tidy/checks/<module>/
    <root>/../test/clang-tidy/checkers/<module>/

UPDATES:
    <root>/CMakeLists.txt            add_subdirectory + library list
    <root>/ClangTidyForceLinker.h    anchor block

EXAMPLES:
    add-module perf                          # Run from the clang-tidy directory
    add-module --root llvm-project/clang-tools-extra/clang-tidy perf
    RUST_LOG=debug add-module perf           # Show region scans
"#)]
struct Cli {
    /// Module directory for new tidy checks (e.g., misc)
    module: Option<String>,

    /// Short description of what the module is about
    #[arg(short, long, default_value = "FIXME: Write a short description")]
    description: String,

    /// clang-tidy source directory (default: $CLANG_TIDY_SOURCE_DIR or .)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Layout config file (default: <root>/.add-module.json)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log every step to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run(cli)
}

/// Validate the name, then load config and scaffold. Nothing on disk is
/// read or written for a rejected name.
fn run(cli: Cli) -> Result<ExitCode> {
    let names = match ModuleNames::new(cli.module.as_deref().unwrap_or_default()) {
        Ok(names) => names,
        Err(err) => return Ok(usage_error(&err)),
    };

    // Not rendered into any generated file yet
    debug!(description = %cli.description, "module description");

    let root = cli
        .root
        .or_else(|| std::env::var_os(ROOT_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let config = Config::discover(&root, cli.config.as_deref())?;
    let layout = Layout::new(&root, &config);

    println!("info: Adding module {} ({})", names.module, names.class_name());

    Scaffold::new(&layout, &names).run(|step| {
        println!("{}", status_line(step.status, &step.path, step.note));
    })?;

    println!("Done. Now it's your turn!");

    Ok(ExitCode::SUCCESS)
}

fn usage_error(err: &ScaffoldError) -> ExitCode {
    eprintln!("{}", err);
    if *err == ScaffoldError::MissingModule {
        eprintln!("{}", Cli::command().render_usage());
    }
    ExitCode::from(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_description_is_optional() {
        let cli = Cli::try_parse_from(["add-module", "perf"]).unwrap();
        assert_eq!(cli.module.as_deref(), Some("perf"));
        assert_eq!(cli.description, "FIXME: Write a short description");

        let cli = Cli::try_parse_from(["add-module", "-d", "Perf checks", "perf"]).unwrap();
        assert_eq!(cli.description, "Perf checks");
    }

    fn exit_code(code: ExitCode) -> String {
        format!("{:?}", code)
    }

    #[test]
    fn test_bad_name_exits_before_config_is_read() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("broken.json");
        std::fs::write(&config, "{ not json").unwrap();
        let root = dir.path().to_str().unwrap();
        let config_arg = config.to_str().unwrap();

        let cli = Cli::try_parse_from([
            "add-module", "--root", root, "--config", config_arg, "my-module!",
        ])
        .unwrap();
        let code = run(cli).unwrap();
        assert_eq!(exit_code(code), exit_code(ExitCode::from(2)));
        assert!(!dir.path().join("my-module!").exists());

        // the same config does fail once the name is valid
        let cli =
            Cli::try_parse_from(["add-module", "--root", root, "--config", config_arg, "perf"])
                .unwrap();
        assert!(run(cli).is_err());
        assert!(!dir.path().join("perf").exists());
    }

    #[test]
    fn test_missing_name_exits_with_usage() {
        let dir = tempfile::TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["add-module", "--root", root]).unwrap();
        let code = run(cli).unwrap();
        assert_eq!(exit_code(code), exit_code(ExitCode::from(2)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_module_may_be_omitted() {
        let cli = Cli::try_parse_from(["add-module"]).unwrap();
        assert!(cli.module.is_none());
    }
}
