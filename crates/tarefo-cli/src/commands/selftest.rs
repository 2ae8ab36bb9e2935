//! Diagnostic self-test: one sample evaluation

use serde_json::{json, Value};
use tarefo_compliance::ComplianceChecker;
use tracing::info;

use crate::error::CliResult;
use crate::output::{print_document, print_result_table, OutputFormat};

/// Storage request with a missing retention policy and a CPF number.
pub fn sample_payload() -> Value {
    json!({
        "consent_obtained": true,
        "necessary_data_only": true,
        "secure_storage": true,
        "data_retention_policy": false,
        "name": "João Silva",
        "email": "joao@example.com",
        "cpf": "123.456.789-00"
    })
}

/// Execute `selftest`
pub fn execute(checker: &ComplianceChecker, format: OutputFormat) -> CliResult<()> {
    info!("Running compliance self-test for a store operation");
    let data = sample_payload();
    match format {
        OutputFormat::Table => {
            let result = checker.evaluator().evaluate("store", &data);
            print_result_table(&result, true);
            Ok(())
        }
        _ => print_document(&checker.run_value("store", &data, true), format),
    }
}
