//! Policy table listing

use clap::Args;
use serde::Serialize;
use tabled::{Table, Tabled};
use tarefo_compliance::{OperationKind, PolicyTable, RuleId};

use crate::error::{CliError, CliResult};
use crate::output::{print_document, OutputFormat};

/// Arguments for `rules`
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Only list the rules of this operation
    #[arg(long)]
    operation: Option<String>,
}

#[derive(Serialize, Tabled)]
struct RuleRow {
    #[tabled(rename = "OPERATION")]
    operation: OperationKind,
    #[tabled(rename = "RULE")]
    rule: RuleId,
    #[tabled(rename = "DESCRIPTION")]
    description: &'static str,
    #[tabled(rename = "RECOMMENDATION")]
    recommendation: &'static str,
}

fn rows(policy: &PolicyTable, operations: &[OperationKind]) -> Vec<RuleRow> {
    operations
        .iter()
        .flat_map(|op| {
            policy.rules_for(*op).iter().map(move |rule| RuleRow {
                operation: *op,
                rule: *rule,
                description: rule.description(),
                recommendation: rule.recommendation(),
            })
        })
        .collect()
}

/// Execute `rules`
pub fn execute(args: RulesArgs, policy: &PolicyTable, format: OutputFormat) -> CliResult<()> {
    let operations: Vec<OperationKind> = match args.operation {
        Some(name) => vec![policy
            .resolve(&name)
            .map_err(|e| CliError::InvalidInput(e.to_string()))?],
        None => policy.operations().collect(),
    };

    let rows = rows(policy, &operations);
    match format {
        OutputFormat::Table => {
            println!("{}", Table::new(rows));
            Ok(())
        }
        _ => print_document(&rows, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_cover_every_rule() {
        let policy = PolicyTable::standard();
        let all: Vec<_> = policy.operations().collect();
        assert_eq!(rows(&policy, &all).len(), 4 + 5 + 5 + 3);
    }

    #[test]
    fn rows_for_single_operation() {
        let policy = PolicyTable::standard();
        let rows = rows(&policy, &[OperationKind::Delete]);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.operation == OperationKind::Delete));
        assert_eq!(rows[0].rule, RuleId::IdentityVerified);
    }
}
