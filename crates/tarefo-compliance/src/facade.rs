//! Text boundary for callers that only exchange JSON strings.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use crate::error::{ComplianceError, Result};
use crate::evaluator::{EvaluationResult, Evaluator};

/// Recommendation reported when the boundary itself fails.
pub const RECOMMEND_SPECIALIST: &str =
    "Consult a compliance specialist to assess this operation";

/// Request envelope exchanged with the orchestration layer.
#[derive(Debug, Clone, Deserialize)]
pub struct ComplianceRequest {
    pub operation: String,
    #[serde(default)]
    pub data: Value,
    /// Caller-side send time; informational only.
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ComplianceRequest {
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ComplianceError::malformed(e.to_string()))
    }
}

/// Serializes evaluations for the orchestration layer.
#[derive(Debug, Clone)]
pub struct ComplianceChecker {
    evaluator: Arc<Evaluator>,
}

impl ComplianceChecker {
    pub fn new(evaluator: Arc<Evaluator>) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Evaluate and serialize to a JSON object. With
    /// `include_recommendations == false` the `recommendations` key is
    /// removed, not emptied.
    pub fn run_value(&self, operation: &str, data: &Value, include_recommendations: bool) -> Value {
        let result = self.evaluator.evaluate(operation, data);
        render(&result, include_recommendations).unwrap_or_else(|err| {
            error!(operation, error = %err, "Failed to render compliance result");
            fault_value(&err)
        })
    }

    /// Evaluate and serialize to JSON text.
    pub fn run(&self, operation: &str, data: &Value, include_recommendations: bool) -> String {
        to_text(&self.run_value(operation, data, include_recommendations))
    }

    /// Parse a raw request envelope, evaluate it and serialize the verdict.
    /// An unparseable envelope yields the boundary fault object.
    pub fn run_request(&self, request: &str, include_recommendations: bool) -> String {
        match ComplianceRequest::parse(request) {
            Ok(req) => self.run(&req.operation, &req.data, include_recommendations),
            Err(err) => {
                error!(error = %err, "Rejected malformed compliance request");
                to_text(&fault_value(&err))
            }
        }
    }
}

impl Default for ComplianceChecker {
    fn default() -> Self {
        Self::new(Arc::new(Evaluator::new()))
    }
}

fn render(result: &EvaluationResult, include_recommendations: bool) -> Result<Value> {
    let mut value = serde_json::to_value(result)?;
    if !include_recommendations {
        if let Value::Object(map) = &mut value {
            map.remove("recommendations");
        }
    }
    Ok(value)
}

/// Degraded verdict used when evaluation could not be carried out.
pub fn fault_value(err: &ComplianceError) -> Value {
    json!({
        "compliant": false,
        "error": err.to_string(),
        "recommendations": [RECOMMEND_SPECIALIST],
    })
}

fn to_text(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| {
        format!(
            r#"{{"compliant":false,"recommendations":["{}"]}}"#,
            RECOMMEND_SPECIALIST
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn run_includes_recommendations_by_default() {
        let checker = ComplianceChecker::default();
        let out = parse(&checker.run("store", &json!({}), true));
        assert_eq!(out["compliant"], false);
        assert_eq!(out["operation"], "store");
        assert_eq!(out["recommendations"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn suppressed_recommendations_are_removed() {
        let checker = ComplianceChecker::default();
        let out = parse(&checker.run("store", &json!({}), false));
        assert!(out.get("recommendations").is_none());
        assert_eq!(out["reason"], "Not all compliance checks passed");
    }

    #[test]
    fn run_request_parses_envelope() {
        let checker = ComplianceChecker::default();
        let out = parse(&checker.run_request(
            r#"{"operation":"store","data":{"consent_obtained":true},"timestamp":"2026-01-01T00:00:00Z"}"#,
            true,
        ));
        assert_eq!(out["checks"][0]["passed"], true);
        assert_eq!(checker.evaluator().audit().len(), 1);
    }

    #[test]
    fn run_request_without_data_uses_null_payload() {
        let checker = ComplianceChecker::default();
        let out = parse(&checker.run_request(r#"{"operation":"share"}"#, true));
        assert_eq!(out["compliant"], false);
        assert_eq!(out["sensitive_data"], false);
    }

    #[test]
    fn malformed_request_yields_fault_object() {
        let checker = ComplianceChecker::default();
        let out = parse(&checker.run_request("{not json", true));
        assert_eq!(out["compliant"], false);
        assert!(out["error"].as_str().unwrap().starts_with("malformed payload"));
        assert_eq!(out["recommendations"][0], RECOMMEND_SPECIALIST);
        assert!(checker.evaluator().audit().is_empty());
    }

    #[test]
    fn unknown_operation_passes_through_reason() {
        let checker = ComplianceChecker::default();
        let out = parse(&checker.run("archive", &json!({}), true));
        assert_eq!(out["reason"], "Unknown operation: archive");
        assert_eq!(out["checks"], json!([]));
    }

    #[test]
    fn checkers_share_one_audit_trail() {
        let evaluator = Arc::new(Evaluator::new());
        let a = ComplianceChecker::new(Arc::clone(&evaluator));
        let b = a.clone();
        a.run("delete", &json!({}), true);
        b.run("process", &json!({}), true);
        assert_eq!(evaluator.audit().len(), 2);
    }
}
