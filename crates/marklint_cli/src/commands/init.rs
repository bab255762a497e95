//! Init command implementation

use std::io::Write;
use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};
use tracing::info;

const DEFAULT_CONFIG: &str = r#"{
  "include": ["**/*.md", "**/*.markdown"],
  "exclude": ["**/node_modules/**", "**/target/**"],
  "debounce_ms": 500
}
"#;

pub fn run_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(".marklint.json");

    loop {
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create_new(true);

        // Never write through a symlink planted at the config path.
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.custom_flags(libc::O_NOFOLLOW);
        }

        match options.open(&config_path) {
            Ok(mut file) => {
                file.write_all(DEFAULT_CONFIG.as_bytes()).into_diagnostic()?;
                info!("Created {}", config_path.display());
                return Ok(());
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                if !force {
                    return Err(miette::miette!(
                        "Config file already exists. Use --force to overwrite."
                    ));
                }

                match std::fs::remove_file(&config_path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_diagnostic(),
                }
            }
            Err(e) => return Err(e).into_diagnostic(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marklint_core::LinterConfig;

    #[test]
    fn default_config_is_valid() {
        let config = LinterConfig::from_json(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.include.len(), 2);
    }
}
