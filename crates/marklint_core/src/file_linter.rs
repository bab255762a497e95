//! Lints and fixes files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::file_finder::FileFinder;
use crate::fixer::try_fix;
use crate::linter::lint_with_locations;
use crate::{LintResult, LinterConfig, LinterError};

/// Result type for [`Linter::lint_files`] and [`Linter::lint_patterns`].
///
/// Contains a tuple of:
/// - Successful lint results
/// - Failed files with their errors (path and error)
pub type LintFilesResult = Result<(Vec<LintResult>, Vec<(PathBuf, LinterError)>), LinterError>;

/// Outcome of running the fixer on one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFixOutcome {
    /// Path to the file.
    pub path: PathBuf,
    /// Whether the fixer changed the content.
    pub changed: bool,
    /// Whether the new content was written back.
    pub written: bool,
}

/// Result type for [`Linter::fix_files`].
pub type FixFilesResult = (Vec<FileFixOutcome>, Vec<(PathBuf, LinterError)>);

/// The file-level linter.
///
/// Each file gets its own engine pass, so files are processed in parallel
/// without shared mutable state.
pub struct Linter {
    config: LinterConfig,
    finder: FileFinder,
}

impl Linter {
    /// Creates a new linter with the given configuration.
    pub fn new(config: LinterConfig) -> Result<Self, LinterError> {
        let finder = FileFinder::from_config(&config)?;
        Ok(Self { config, finder })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LinterConfig {
        &self.config
    }

    /// Discovers files matching the given paths or glob patterns.
    pub fn discover_files(&self, patterns: &[String]) -> Result<Vec<PathBuf>, LinterError> {
        self.finder
            .discover_files(patterns, &self.config.root_dir())
    }

    /// Lints files matching the given patterns.
    pub fn lint_patterns(&self, patterns: &[String]) -> LintFilesResult {
        let files = self.discover_files(patterns)?;
        self.lint_files(&files)
    }

    /// Lints a list of files in parallel using rayon.
    ///
    /// Returns a tuple of (successful results, failed files with errors).
    pub fn lint_files(&self, paths: &[PathBuf]) -> LintFilesResult {
        let results: Vec<Result<LintResult, (PathBuf, LinterError)>> = paths
            .par_iter()
            .map(|path| self.lint_file(path).map_err(|e| (path.clone(), e)))
            .collect();

        let (successes, failures) = split_results(results);
        info!(
            "Linted {} files ({} failed)",
            successes.len(),
            failures.len()
        );
        Ok((successes, failures))
    }

    /// Lints a single file, filling in line/column locations.
    pub fn lint_file(&self, path: &Path) -> Result<LintResult, LinterError> {
        debug!("Linting {}", path.display());
        let content = read_file(path)?;
        let diagnostics = lint_with_locations(&content)?;
        Ok(LintResult::new(path.to_path_buf(), diagnostics))
    }

    /// Runs the fixer over files in parallel.
    ///
    /// In check mode nothing is written; the outcome still reports whether
    /// each file would change.
    pub fn fix_files(&self, paths: &[PathBuf], check: bool) -> FixFilesResult {
        let results: Vec<Result<FileFixOutcome, (PathBuf, LinterError)>> = paths
            .par_iter()
            .map(|path| fix_file(path, check).map_err(|e| (path.clone(), e)))
            .collect();

        split_results(results)
    }
}

fn fix_file(path: &Path, check: bool) -> Result<FileFixOutcome, LinterError> {
    let content = read_file(path)?;
    let fixed = try_fix(&content)?;
    let changed = fixed != content;
    let written = changed && !check;

    if written {
        fs::write(path, &fixed)
            .map_err(|e| LinterError::file(format!("Failed to write {}: {}", path.display(), e)))?;
        debug!("Fixed {}", path.display());
    }

    Ok(FileFixOutcome {
        path: path.to_path_buf(),
        changed,
        written,
    })
}

fn read_file(path: &Path) -> Result<String, LinterError> {
    fs::read_to_string(path)
        .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))
}

fn split_results<T>(
    results: Vec<Result<T, (PathBuf, LinterError)>>,
) -> (Vec<T>, Vec<(PathBuf, LinterError)>) {
    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(value) => successes.push(value),
            Err((path, error)) => {
                warn!("Failed to process {}: {}", path.display(), error);
                failures.push((path, error));
            }
        }
    }
    (successes, failures)
}
