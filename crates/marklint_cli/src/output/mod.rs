//! Output formatting module

mod json;
mod sarif;
mod text;

use std::path::PathBuf;

use marklint_core::{LintResult, LinterError};
use miette::Result;

use crate::cli::OutputFormat;

/// Prints `results` in the chosen format and reports whether any file has
/// an error-severity diagnostic.
pub fn output_results(results: &[LintResult], format: OutputFormat) -> Result<bool> {
    let has_errors = results.iter().any(|r| r.has_errors());

    match format {
        OutputFormat::Sarif => sarif::output_sarif(results)?,
        OutputFormat::Json => json::output_json(results)?,
        OutputFormat::Text => text::output_text(results),
    }

    Ok(has_errors)
}

/// Reports files that could not be processed.
pub fn output_failures(failures: &[(PathBuf, LinterError)]) {
    for (path, error) in failures {
        eprintln!("{}: {}", path.display(), error);
    }
}
