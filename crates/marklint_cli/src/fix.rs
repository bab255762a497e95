//! Quick-fix application for `lint --fix`

use std::path::PathBuf;

use marklint_core::{LintResult, apply_fixes_to_file};
use tracing::error;

/// Summary of applied fixes.
pub struct FixSummary {
    pub total_fixes: usize,
    pub files_fixed: usize,
    pub fixes_by_file: Vec<(PathBuf, usize)>,
    pub errors: Vec<(PathBuf, String)>,
}

/// Applies the quick fixes carried by each file's diagnostics.
pub fn apply_fixes(results: &[LintResult], dry_run: bool) -> FixSummary {
    let mut summary = FixSummary {
        total_fixes: 0,
        files_fixed: 0,
        fixes_by_file: Vec::new(),
        errors: Vec::new(),
    };

    for result in results {
        let fixable_count = result.fixable_count();
        if fixable_count == 0 {
            continue;
        }

        if dry_run {
            summary.fixes_by_file.push((result.path.clone(), fixable_count));
            summary.total_fixes += fixable_count;
            summary.files_fixed += 1;
            continue;
        }

        match apply_fixes_to_file(&result.path, &result.diagnostics) {
            Ok(fixer_result) if fixer_result.modified => {
                summary
                    .fixes_by_file
                    .push((result.path.clone(), fixer_result.fixes_applied));
                summary.total_fixes += fixer_result.fixes_applied;
                summary.files_fixed += 1;
            }
            Ok(_) => {}
            Err(e) => {
                error!("Failed to fix {}: {}", result.path.display(), e);
                summary.errors.push((result.path.clone(), e.to_string()));
            }
        }
    }

    summary
}

/// Prints the fix summary.
pub fn output_fix_summary(summary: &FixSummary, dry_run: bool) {
    if summary.total_fixes == 0 && summary.errors.is_empty() {
        println!("No fixable issues found.");
        return;
    }

    if summary.total_fixes > 0 {
        let action = if dry_run { "Would fix" } else { "Fixed" };
        println!(
            "\n{} {} issues in {} files:",
            action, summary.total_fixes, summary.files_fixed
        );
        for (path, count) in &summary.fixes_by_file {
            println!("  {}: {} fixes", path.display(), count);
        }

        if dry_run {
            println!("\nRun without --dry-run to apply fixes.");
        }
    }

    if !summary.errors.is_empty() {
        eprintln!("\nFailed to fix {} file(s):", summary.errors.len());
        for (path, err) in &summary.errors {
            eprintln!("  {}: {}", path.display(), err);
        }
    }
}
