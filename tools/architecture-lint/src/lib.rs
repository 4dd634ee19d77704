//! Layering lint for the `cep-weather` crate.
//!
//! The crate keeps its hexagon at the module level. Each file under
//! `src/domain`, `src/inbound`, `src/outbound` or `src/middleware` is parsed
//! and every path it mentions (in `use` items and in expressions, types and
//! macro invocations) is resolved to a crate-level module or an external
//! crate. `self::` and `super::` are resolved against the file's module, so
//! `super::super::super::inbound` in `outbound/weatherapi/http_source.rs` is
//! caught too.
//!
//! Test code is exempt: items under `#[cfg(test)]` and `tests.rs` files may
//! use mock servers and SDK types freely. Everything outside the four layers
//! (`server`, `config`, `telemetry`, the binaries) is the composition root and
//! is not linted.

mod imports;
mod layer;

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use layer::Layer;

use imports::Target;

/// Library name of the linted crate, as written in absolute paths.
pub const CRATE_NAME: &str = "cep_weather";

/// A single layering violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to the crate's `src/`.
    pub file: PathBuf,
    /// Line of the first offending reference.
    pub line: usize,
    /// The broken rule, e.g. ``domain must not depend on `reqwest` ``.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file.display(), self.line, self.message)
    }
}

/// Failure modes returned by the lint.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// A source directory or file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A layered file is not valid Rust.
    #[error("failed to parse {}: {source}", .file.display())]
    Parse {
        file: PathBuf,
        #[source]
        source: syn::Error,
    },
    /// At least one rule was broken.
    #[error("{} layering violation(s):\n{}", .0.len(), render(.0))]
    Violations(Vec<Violation>),
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("  {violation}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to the crate's `src/`.
    pub file: PathBuf,
    /// Rust source text.
    pub contents: String,
}

impl LintSource {
    /// Source `contents` at `file`, relative to the crate's `src/`.
    pub fn new(file: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            contents: contents.into(),
        }
    }
}

/// Lint every layered source file of the crate rooted at `crate_dir`.
///
/// # Errors
///
/// Returns [`LintError`] when a file cannot be read or parsed, or when any
/// violation is found.
pub fn lint_crate_sources(crate_dir: &Path) -> Result<(), LintError> {
    let src_dir = crate_dir.join("src");
    let mut sources = Vec::new();
    collect_sources(&src_dir, &src_dir, &mut sources)?;
    lint_sources(&sources)
}

/// Lint in-memory sources. Files outside the layered modules are ignored.
///
/// # Errors
///
/// Returns [`LintError::Parse`] for unparsable sources and
/// [`LintError::Violations`] when any rule is broken.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), LintError> {
    let mut violations = Vec::new();
    for source in sources {
        let Some(layer) = Layer::of(&source.file) else {
            continue;
        };
        if is_test_file(&source.file) {
            continue;
        }
        let parsed = syn::parse_file(&source.contents).map_err(|source_err| LintError::Parse {
            file: source.file.clone(),
            source: source_err,
        })?;
        violations.extend(check(&source.file, layer, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(LintError::Violations(violations))
    }
}

fn check(file: &Path, layer: Layer, parsed: &syn::File) -> Vec<Violation> {
    let module = imports::module_path(file);
    let mut first_seen: BTreeMap<String, usize> = BTreeMap::new();

    for dependency in imports::collect(CRATE_NAME, &module, parsed) {
        let message = match &dependency.target {
            Target::Module(root) if layer.forbids_module(root) => {
                format!("{} must not depend on crate::{root}", layer.name())
            }
            Target::Crate(root) if layer.forbids_crate(root) => {
                format!("{} must not depend on `{root}`", layer.name())
            }
            _ => continue,
        };
        first_seen
            .entry(message)
            .and_modify(|line| *line = (*line).min(dependency.line))
            .or_insert(dependency.line);
    }

    let mut violations: Vec<Violation> = first_seen
        .into_iter()
        .map(|(message, line)| Violation {
            file: file.to_path_buf(),
            line,
            message,
        })
        .collect();
    violations.sort_by_key(|violation| violation.line);
    violations
}

fn is_test_file(file: &Path) -> bool {
    file.file_name().is_some_and(|name| name == "tests.rs")
        || file.components().any(|part| part.as_os_str() == "tests")
}

fn collect_sources(
    src_root: &Path,
    dir: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), LintError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| LintError::Io { path, source }
    };
    for entry in fs::read_dir(dir).map_err(io_err(dir))? {
        let path = entry.map_err(io_err(dir))?.path();
        if path.is_dir() {
            collect_sources(src_root, &path, sources)?;
            continue;
        }
        if path.extension().is_none_or(|ext| ext != "rs") {
            continue;
        }
        let Ok(relative) = path.strip_prefix(src_root) else {
            continue;
        };
        let contents = fs::read_to_string(&path).map_err(io_err(&path))?;
        sources.push(LintSource::new(relative, contents));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
