//! CLI utility functions

use miette::{IntoDiagnostic, Result};
use tokio::runtime::Runtime;
use tracing::info;

use marklint_core::LinterConfig;

use crate::cli::Cli;

pub fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Loads the config named by `--config`, or the nearest one found upward
/// from the working directory, or the defaults.
pub fn load_config(cli: &Cli) -> Result<LinterConfig> {
    if let Some(ref path) = cli.config {
        return LinterConfig::from_file(path).into_diagnostic();
    }

    let cwd = std::env::current_dir().into_diagnostic()?;
    if let Some(path) = LinterConfig::discover(&cwd) {
        info!("Using config: {}", path.display());
        return LinterConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(LinterConfig::new())
}
