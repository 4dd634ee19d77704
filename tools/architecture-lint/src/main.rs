//! `architecture-lint [CRATE_DIR]`
//!
//! Lints `CRATE_DIR` (default: the `backend` crate of the enclosing
//! workspace) and exits non-zero on any violation.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let crate_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(default_crate_dir);
    let Some(crate_dir) = crate_dir else {
        report(&"no crate directory given and no enclosing workspace found");
        return ExitCode::FAILURE;
    };

    match architecture_lint::lint_crate_sources(&crate_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn report(message: &dyn std::fmt::Display) {
    let _ = writeln!(io::stderr().lock(), "{message}");
}

/// `<workspace>/backend`, searching upwards from the working directory and
/// then from this tool's manifest.
fn default_crate_dir() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    cwd.iter()
        .chain(std::iter::once(&manifest))
        .find_map(|start| workspace_root(start))
        .map(|root| root.join("backend"))
}

fn workspace_root(start: &Path) -> Option<&Path> {
    start.ancestors().find(|dir| {
        std::fs::read_to_string(dir.join("Cargo.toml"))
            .is_ok_and(|manifest| manifest.contains("[workspace]"))
    })
}
