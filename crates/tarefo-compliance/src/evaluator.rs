//! Rule evaluation against the policy table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::audit::{AuditRecord, AuditTrail};
use crate::config::EvaluatorConfig;
use crate::error::Result;
use crate::policy::{OperationKind, PolicyTable, RuleId};
use crate::sensitive::SensitiveMarkerSet;

/// Reason reported when at least one check failed.
pub const REASON_CHECKS_FAILED: &str = "Not all compliance checks passed";

/// Recommendation reported for an unrecognized operation.
pub const RECOMMEND_SUPPORTED_OPERATION: &str =
    "Use one of the supported operations: store, process, share, delete";

/// Recommendation reported when the evaluation itself failed.
pub const RECOMMEND_CHECK_FORMAT: &str = "Check the format of the submitted data and try again";

/// Outcome of a single rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub rule: RuleId,
    pub passed: bool,
    pub description: String,
}

impl CheckOutcome {
    fn evaluate(rule: RuleId, data: &Value) -> Self {
        Self {
            rule,
            passed: rule_affirmed(data, rule),
            description: rule.description().to_string(),
        }
    }
}

/// Verdict for one `(operation, data)` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub compliant: bool,
    pub operation: String,
    pub timestamp: DateTime<Utc>,
    pub checks: Vec<CheckOutcome>,
    pub sensitive_data: bool,
    pub sensitive_types: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl EvaluationResult {
    fn rejected(operation: &str, reason: String, recommendation: &str) -> Self {
        Self {
            compliant: false,
            operation: operation.to_string(),
            timestamp: Utc::now(),
            checks: Vec::new(),
            sensitive_data: false,
            sensitive_types: Vec::new(),
            recommendations: vec![recommendation.to_string()],
            reason: Some(reason),
        }
    }

    /// Checks that did not pass, in evaluation order.
    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// A rule passes only when the payload maps its key to boolean `true`.
fn rule_affirmed(data: &Value, rule: RuleId) -> bool {
    matches!(data.get(rule.key()), Some(Value::Bool(true)))
}

/// Compliance evaluator owning its policy table, marker set and audit trail.
///
/// `Evaluator` is `Send + Sync`; share it by reference or behind an `Arc`.
#[derive(Debug)]
pub struct Evaluator {
    policy: PolicyTable,
    markers: SensitiveMarkerSet,
    audit: AuditTrail,
    log_audits: bool,
    audit_log_limit: usize,
}

impl Evaluator {
    /// Evaluator with the standard policy table and default markers.
    pub fn new() -> Self {
        Self::from_config(&EvaluatorConfig::default())
    }

    pub fn from_config(config: &EvaluatorConfig) -> Self {
        Self {
            policy: PolicyTable::standard(),
            markers: SensitiveMarkerSet::new(&config.sensitive_fields)
                .with_max_depth(config.max_payload_depth),
            audit: AuditTrail::new(),
            log_audits: config.log_audits,
            audit_log_limit: config.audit_log_limit,
        }
    }

    pub fn policy(&self) -> &PolicyTable {
        &self.policy
    }

    pub fn markers(&self) -> &SensitiveMarkerSet {
        &self.markers
    }

    pub fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    /// Evaluate `data` for `operation`.
    ///
    /// Never fails: unknown operations and malformed payloads come back as
    /// non-compliant results carrying a `reason`.
    pub fn evaluate(&self, operation: &str, data: &Value) -> EvaluationResult {
        let kind = match self.policy.resolve(operation) {
            Ok(kind) => kind,
            Err(err) => {
                warn!(operation, "Rejected unsupported operation");
                return EvaluationResult::rejected(
                    operation,
                    err.to_string(),
                    RECOMMEND_SUPPORTED_OPERATION,
                );
            }
        };

        match self.check(kind, data) {
            Ok(result) => result,
            Err(err) => {
                error!(operation, error = %err, "Compliance check failed");
                EvaluationResult::rejected(
                    operation,
                    format!("Compliance check failed: {}", err),
                    RECOMMEND_CHECK_FORMAT,
                )
            }
        }
    }

    /// Evaluate `data` for an already-resolved operation.
    pub fn check(&self, operation: OperationKind, data: &Value) -> Result<EvaluationResult> {
        let detection = self.markers.try_detect(data)?;

        let mut checks: Vec<CheckOutcome> = self
            .policy
            .rules_for(operation)
            .iter()
            .map(|rule| CheckOutcome::evaluate(*rule, data))
            .collect();

        if detection.found {
            checks.push(CheckOutcome::evaluate(RuleId::SensitiveDataHandling, data));
        }

        let recommendations: Vec<String> = checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.rule.recommendation().to_string())
            .collect();
        let compliant = recommendations.is_empty();
        let timestamp = Utc::now();

        if self.log_audits {
            self.audit.append(AuditRecord::new(
                operation,
                timestamp,
                compliant,
                detection.found,
            ));
        }

        debug!(
            operation = %operation,
            compliant,
            sensitive = detection.found,
            failed = recommendations.len(),
            "Compliance evaluation complete"
        );

        Ok(EvaluationResult {
            compliant,
            operation: operation.to_string(),
            timestamp,
            checks,
            sensitive_data: detection.found,
            sensitive_types: detection.types,
            recommendations,
            reason: (!compliant).then(|| REASON_CHECKS_FAILED.to_string()),
        })
    }

    /// The `limit` most recent audit records, newest first.
    pub fn recent(&self, limit: usize) -> Vec<AuditRecord> {
        self.audit.recent(limit)
    }

    /// Most recent audit records, up to the configured default limit.
    pub fn recent_default(&self) -> Vec<AuditRecord> {
        self.audit.recent(self.audit_log_limit)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
