//! Text output formatter

use marklint_core::{LintResult, LintSummary};

pub fn output_text(results: &[LintResult]) {
    for result in results {
        for diag in &result.diagnostics {
            // Lines are already 1-based; columns are printed 1-based too.
            let (line, column) = diag
                .loc
                .map(|loc| (loc.start.line, loc.start.column + 1))
                .unwrap_or((0, 0));
            println!(
                "{}:{}:{} {} [{}] {}",
                result.path.display(),
                line,
                column,
                diag.severity,
                diag.rule_id,
                diag.message
            );
        }
    }

    let summary = LintSummary::from_results(results);
    println!();
    println!(
        "Checked {} files, found {} issues ({} errors, {} warnings, {} fixable)",
        summary.files_checked,
        summary.total(),
        summary.errors,
        summary.warnings,
        summary.fixable
    );
}
