//! Evaluate a stream of request envelopes and report the audit trail

use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use serde_json::Value;
use tarefo_compliance::facade::fault_value;
use tarefo_compliance::{AuditRecord, ComplianceChecker, ComplianceRequest};
use tracing::{info, warn};

use crate::error::CliResult;
use crate::output::{
    print_audit_table, print_document, print_result_table, print_warning, OutputFormat,
};

/// Arguments for `batch`
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON-lines file of request envelopes (stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of audit records to report afterwards
    #[arg(long)]
    audit_limit: Option<usize>,

    /// Omit recommendations from the output
    #[arg(long)]
    no_recommendations: bool,
}

#[derive(Serialize)]
struct BatchReport {
    results: Vec<Value>,
    audit: Vec<AuditRecord>,
}

/// Execute `batch`
pub fn execute(args: BatchArgs, checker: &ComplianceChecker, format: OutputFormat) -> CliResult<()> {
    let include_recommendations = !args.no_recommendations;
    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let mut results = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match ComplianceRequest::parse(&line) {
            Ok(request) => {
                if format == OutputFormat::Table {
                    let result = checker.evaluator().evaluate(&request.operation, &request.data);
                    print_result_table(&result, include_recommendations);
                    println!();
                } else {
                    results.push(checker.run_value(
                        &request.operation,
                        &request.data,
                        include_recommendations,
                    ));
                }
            }
            Err(err) => {
                warn!(line = line_no + 1, error = %err, "Malformed request");
                if format == OutputFormat::Table {
                    print_warning(&format!("line {}: {}", line_no + 1, err));
                    println!();
                } else {
                    results.push(fault_value(&err));
                }
            }
        }
    }

    let audit = match args.audit_limit {
        Some(limit) => checker.evaluator().recent(limit),
        None => checker.evaluator().recent_default(),
    };
    info!(
        evaluated = checker.evaluator().audit().len(),
        reported = audit.len(),
        "Batch complete"
    );

    match format {
        OutputFormat::Table => {
            println!("Audit trail (newest first):");
            print_audit_table(&audit);
            Ok(())
        }
        _ => print_document(&BatchReport { results, audit }, format),
    }
}
