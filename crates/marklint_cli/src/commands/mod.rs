//! Subcommand implementations

mod fix;
mod init;
mod lint;
mod lsp;
mod rules;

pub use fix::run_fix;
pub use init::run_init;
pub use lint::run_lint;
pub use lsp::run_lsp;
pub use rules::run_rules;
