//! Text and JSON rendering of resolution results for the command line.

use crate::errors::ResolverError;
use crate::registry::{RuleSetDefinition, RuleSetRegistry};
use crate::resolver::ResolutionReport;
use crate::types::{ActiveConfiguration, RuleId, RuleSetId};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct RuleSetSummary<'a> {
    id: &'a RuleSetId,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    rules: usize,
    imports: &'a [RuleSetId],
}

#[derive(Debug, Serialize)]
struct RuleSetExpansion<'a> {
    id: &'a RuleSetId,
    rules: &'a BTreeSet<RuleId>,
}

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn active_configuration(
        active: &ActiveConfiguration,
        format: OutputFormat,
    ) -> Result<String, ResolverError> {
        match format {
            OutputFormat::Json => Self::json(&serde_json::json!({
                "target_paths": active.target_paths,
                "active_rules": active.active_rules,
                "fingerprint": active.fingerprint(),
            })),
            OutputFormat::Text => {
                let mut out = String::new();
                out.push_str(&format!("Target paths ({}):\n", active.target_paths.len()));
                for path in &active.target_paths {
                    out.push_str(&format!("  {}\n", path.display()));
                }
                out.push_str(&format!("Active rules ({}):\n", active.active_rules.len()));
                for rule in &active.active_rules {
                    out.push_str(&format!("  {rule}\n"));
                }
                out.push_str(&format!("Fingerprint: {}\n", active.fingerprint()));
                Ok(out)
            }
        }
    }

    pub fn resolution_report(
        report: &ResolutionReport,
        format: OutputFormat,
    ) -> Result<String, ResolverError> {
        match format {
            OutputFormat::Json => Self::json(report),
            OutputFormat::Text => {
                let mut out = String::new();
                out.push_str(&format!("Active rules ({}):\n", report.sources.len()));
                for (rule, sources) in &report.sources {
                    let sources: Vec<String> = sources.iter().map(ToString::to_string).collect();
                    out.push_str(&format!("  {rule}  <- {}\n", sources.join(", ")));
                }
                if !report.excluded.is_empty() {
                    out.push_str(&format!("Excluded ({}):\n", report.excluded.len()));
                    for rule in &report.excluded {
                        out.push_str(&format!("  {rule}\n"));
                    }
                }
                if !report.ineffective_exclusions.is_empty() {
                    out.push_str(&format!(
                        "Exclusions with no effect ({}):\n",
                        report.ineffective_exclusions.len()
                    ));
                    for rule in &report.ineffective_exclusions {
                        out.push_str(&format!("  {rule}\n"));
                    }
                }
                Ok(out)
            }
        }
    }

    pub fn rule_sets(
        registry: &RuleSetRegistry,
        format: OutputFormat,
    ) -> Result<String, ResolverError> {
        let summaries: Vec<RuleSetSummary<'_>> =
            registry.definitions().map(Self::summarize).collect();

        match format {
            OutputFormat::Json => Self::json(&summaries),
            OutputFormat::Text => {
                let mut out = format!("Rule sets: {} registered\n", summaries.len());
                for summary in &summaries {
                    out.push_str(&format!("  {} ({} rules", summary.id, summary.rules));
                    if !summary.imports.is_empty() {
                        let imports: Vec<&str> =
                            summary.imports.iter().map(RuleSetId::as_str).collect();
                        out.push_str(&format!(", imports {}", imports.join(", ")));
                    }
                    out.push(')');
                    if let Some(description) = summary.description {
                        out.push_str(&format!(" - {description}"));
                    }
                    out.push('\n');
                }
                Ok(out)
            }
        }
    }

    pub fn rule_set_expansion(
        id: &RuleSetId,
        rules: &BTreeSet<RuleId>,
        format: OutputFormat,
    ) -> Result<String, ResolverError> {
        match format {
            OutputFormat::Json => Self::json(&RuleSetExpansion { id, rules }),
            OutputFormat::Text => {
                let mut out = format!("{id} expands to {} rules:\n", rules.len());
                for rule in rules {
                    out.push_str(&format!("  {rule}\n"));
                }
                Ok(out)
            }
        }
    }

    fn summarize(definition: &RuleSetDefinition) -> RuleSetSummary<'_> {
        RuleSetSummary {
            id: &definition.id,
            description: definition.description.as_deref(),
            rules: definition.rules.len(),
            imports: &definition.imports,
        }
    }

    fn json<T: Serialize + ?Sized>(value: &T) -> Result<String, ResolverError> {
        let mut rendered = serde_json::to_string_pretty(value)?;
        rendered.push('\n');
        Ok(rendered)
    }
}
