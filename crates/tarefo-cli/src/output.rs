//! Output formatting utilities

use colored::*;
use serde::Serialize;
use tabled::{Table, Tabled};
use tarefo_compliance::{AuditRecord, EvaluationResult};

use crate::error::CliResult;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON, for the orchestration boundary
    #[default]
    Json,
    /// Human-readable tables
    Table,
    /// YAML format
    Yaml,
}

/// Print a single serializable document
pub fn print_document<T: Serialize>(data: &T, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json | OutputFormat::Table => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(data)?);
        }
    }
    Ok(())
}

/// Row for the per-rule table
#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "RULE")]
    rule: String,
    #[tabled(rename = "PASSED")]
    passed: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
}

/// Print one evaluation as a table with a verdict header
pub fn print_result_table(result: &EvaluationResult, include_recommendations: bool) {
    let verdict = if result.compliant {
        "COMPLIANT".green().bold()
    } else {
        "NOT COMPLIANT".red().bold()
    };
    println!("{} {} ({})", verdict, result.operation, result.timestamp);
    if let Some(reason) = &result.reason {
        println!("  {}", reason.dimmed());
    }
    if result.sensitive_data {
        print_warning(&format!(
            "sensitive data: {}",
            result.sensitive_types.join(", ")
        ));
    }

    if !result.checks.is_empty() {
        let rows: Vec<CheckRow> = result
            .checks
            .iter()
            .map(|c| CheckRow {
                rule: c.rule.to_string(),
                passed: if c.passed { "✓" } else { "✗" }.to_string(),
                description: c.description.clone(),
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    if include_recommendations && !result.recommendations.is_empty() {
        println!("\nRecommendations:");
        for recommendation in &result.recommendations {
            println!("  - {}", recommendation);
        }
    }
}

/// Row for the audit table
#[derive(Tabled)]
struct AuditRow {
    #[tabled(rename = "TIMESTAMP")]
    timestamp: String,
    #[tabled(rename = "OPERATION")]
    operation: String,
    #[tabled(rename = "COMPLIANT")]
    compliant: bool,
    #[tabled(rename = "SENSITIVE")]
    sensitive_data: bool,
}

/// Print audit records as a table
pub fn print_audit_table(records: &[AuditRecord]) {
    if records.is_empty() {
        println!("{}", "No audit records".dimmed());
        return;
    }
    let rows: Vec<AuditRow> = records
        .iter()
        .map(|r| AuditRow {
            timestamp: r.timestamp.to_rfc3339(),
            operation: r.operation.to_string(),
            compliant: r.compliant,
            sensitive_data: r.sensitive_data,
        })
        .collect();
    println!("{}", Table::new(rows));
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}
