//! SARIF (Static Analysis Results Interchange Format) output formatter.
//!
//! Implements SARIF 2.1.0 format for integration with GitHub Advanced Security
//! and other CI/CD tools.

use std::path::Path;

use serde::Serialize;

use crate::LintResult;
use crate::diagnostic::{Diagnostic, Severity};
use crate::rules::RuleId;

/// SARIF version constant
const SARIF_VERSION: &str = "2.1.0";

const SARIF_SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";

/// Tool information for SARIF
const TOOL_NAME: &str = "marklint";

/// Generates SARIF output from lint results
pub fn generate_sarif(results: &[LintResult]) -> Result<String, serde_json::Error> {
    let sarif_log = SarifLog::from_results(results);
    serde_json::to_string_pretty(&sarif_log)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run>,
}

impl SarifLog {
    fn from_results(results: &[LintResult]) -> Self {
        Self {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![Run::from_results(results)],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Run {
    tool: Tool,
    results: Vec<SarifResult>,
}

impl Run {
    fn from_results(lint_results: &[LintResult]) -> Self {
        let results = lint_results
            .iter()
            .flat_map(|lint_result| {
                lint_result
                    .diagnostics
                    .iter()
                    .map(|d| SarifResult::from_diagnostic(d, &lint_result.path))
            })
            .collect();

        Self {
            tool: Tool {
                driver: ToolComponent::new(),
            },
            results,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    driver: ToolComponent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolComponent {
    name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'static str>,
    rules: Vec<ReportingDescriptor>,
}

impl ToolComponent {
    /// The rule set is fixed, so every rule is always described.
    fn new() -> Self {
        Self {
            name: TOOL_NAME,
            version: option_env!("CARGO_PKG_VERSION"),
            rules: RuleId::ALL.iter().map(ReportingDescriptor::new).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportingDescriptor {
    id: &'static str,
    name: &'static str,
    short_description: Message,
    default_configuration: Configuration,
}

impl ReportingDescriptor {
    fn new(rule: &RuleId) -> Self {
        Self {
            id: rule.as_str(),
            name: rule.as_str(),
            short_description: Message::text(rule.description()),
            default_configuration: Configuration {
                level: level(rule.severity()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Configuration {
    level: &'static str,
}

#[derive(Debug, Serialize)]
struct Message {
    text: String,
}

impl Message {
    fn text(s: impl Into<String>) -> Self {
        Self { text: s.into() }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: &'static str,
    message: Message,
    locations: Vec<Location>,
}

impl SarifResult {
    fn from_diagnostic(diagnostic: &Diagnostic, path: &Path) -> Self {
        Self {
            rule_id: diagnostic.rule_id.clone(),
            level: level(diagnostic.severity),
            message: Message::text(&diagnostic.message),
            locations: vec![Location {
                physical_location: PhysicalLocation {
                    artifact_location: ArtifactLocation {
                        uri: path.to_string_lossy().replace('\\', "/"),
                    },
                    region: diagnostic.loc.as_ref().map(Region::from_location),
                },
            }],
        }
    }
}

fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "note",
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    physical_location: PhysicalLocation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PhysicalLocation {
    artifact_location: ArtifactLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<Region>,
}

#[derive(Debug, Serialize)]
struct ArtifactLocation {
    uri: String,
}

/// Line/column region. SARIF columns are 1-based.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Region {
    start_line: u32,
    start_column: u32,
    end_line: u32,
    end_column: u32,
}

impl Region {
    fn from_location(loc: &crate::span::Location) -> Self {
        Self {
            start_line: loc.start.line,
            start_column: loc.start.column + 1,
            end_line: loc.end.line,
            end_column: loc.end.column + 1,
        }
    }
}
