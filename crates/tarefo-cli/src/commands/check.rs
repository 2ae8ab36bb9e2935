//! Single-request evaluation

use std::path::PathBuf;

use clap::Args;
use serde_json::Value;
use tarefo_compliance::facade::fault_value;
use tarefo_compliance::{ComplianceChecker, ComplianceError, ComplianceRequest};
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::output::{print_document, print_result_table, OutputFormat};

/// Arguments for `check`
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Operation to evaluate (store, process, share, delete)
    #[arg(long)]
    operation: Option<String>,

    /// Inline JSON payload
    #[arg(short, long, conflicts_with = "data_file")]
    data: Option<String>,

    /// Read the JSON payload from a file
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Full request envelope `{"operation": ..., "data": ...}`; ignored
    /// when --operation is given
    #[arg(long, env = "TAREFO_DATA", hide_env_values = true)]
    request: Option<String>,

    /// Omit recommendations from the output
    #[arg(long)]
    no_recommendations: bool,
}

/// Execute `check`
pub fn execute(args: CheckArgs, checker: &ComplianceChecker, format: OutputFormat) -> CliResult<()> {
    let include_recommendations = !args.no_recommendations;

    let (operation, data) = match (args.operation, args.request) {
        (Some(operation), _) => {
            let payload = match (args.data, args.data_file) {
                (Some(inline), _) => inline,
                (None, Some(path)) => std::fs::read_to_string(path)?,
                (None, None) => "{}".to_string(),
            };
            match serde_json::from_str::<Value>(&payload) {
                Ok(data) => (operation, data),
                Err(err) => {
                    let err = ComplianceError::malformed(err.to_string());
                    return print_document(&fault_value(&err), format);
                }
            }
        }
        (None, Some(raw)) => match ComplianceRequest::parse(&raw) {
            Ok(request) => {
                debug!(sent_at = ?request.timestamp, "Evaluating request envelope");
                (request.operation, request.data)
            }
            // The orchestration layer expects a verdict object even for a
            // garbled envelope.
            Err(err) => return print_document(&fault_value(&err), format),
        },
        (None, None) => {
            return Err(CliError::InvalidInput(
                "provide --operation or a request envelope via --request / TAREFO_DATA".into(),
            ))
        }
    };

    match format {
        OutputFormat::Table => {
            let result = checker.evaluator().evaluate(&operation, &data);
            print_result_table(&result, include_recommendations);
            Ok(())
        }
        _ => print_document(
            &checker.run_value(&operation, &data, include_recommendations),
            format,
        ),
    }
}
