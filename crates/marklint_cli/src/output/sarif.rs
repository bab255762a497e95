//! SARIF output formatter

use marklint_core::LintResult;
use miette::{IntoDiagnostic, Result};

pub fn output_sarif(results: &[LintResult]) -> Result<()> {
    let sarif_output = marklint_core::generate_sarif(results).into_diagnostic()?;
    println!("{}", sarif_output);
    Ok(())
}
