//! Linter configuration.
//!
//! The rule set is fixed; configuration only covers which files are linted
//! and how the language server paces re-linting.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::LinterError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Default language server debounce delay.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Configuration for the linter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinterConfig {
    /// Glob patterns a file must match to be linted.
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns of files to skip. Exclusion wins over inclusion.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Language server debounce delay in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Directory containing the config file, if loaded from one.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl LinterConfig {
    /// Config file names, in lookup order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".marklint.jsonc", ".marklint.json"];

    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            base_dir: None,
        }
    }

    /// Finds the nearest config file in `start` or one of its ancestors.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            Self::CONFIG_FILES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Loads configuration from a file. Comments are allowed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LinterError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_json(&content)?;
        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses configuration from a JSON (or JSONC) string.
    pub fn from_json(json: &str) -> Result<Self, LinterError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        if let Err(e) = schema()?.validate(&value) {
            return Err(LinterError::config(format!(
                "Config validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))
    }

    /// Returns the directory that relative patterns are resolved against.
    pub fn root_dir(&self) -> PathBuf {
        self.base_dir
            .clone()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn schema() -> Result<&'static Validator, LinterError> {
    if let Some(validator) = CONFIG_SCHEMA.get() {
        return Ok(validator);
    }

    let schema_json: serde_json::Value = serde_json::from_str(SCHEMA_JSON)
        .map_err(|e| LinterError::internal(format!("Invalid embedded config schema: {}", e)))?;
    let validator = Validator::new(&schema_json)
        .map_err(|e| LinterError::internal(format!("Invalid config schema: {}", e)))?;
    Ok(CONFIG_SCHEMA.get_or_init(|| validator))
}
