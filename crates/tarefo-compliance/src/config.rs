//! Evaluator configuration.
//!
//! Loading (files, environment) is left to the host; this is only the shape
//! it deserializes into.

use serde::{Deserialize, Serialize};

use crate::audit::DEFAULT_AUDIT_LIMIT;
use crate::sensitive::{DEFAULT_MAX_PAYLOAD_DEPTH, DEFAULT_SENSITIVE_MARKERS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Record every recognized evaluation in the audit trail
    #[serde(default = "default_true")]
    pub log_audits: bool,

    /// Sensitive-data markers, in scan order
    #[serde(default = "default_sensitive_fields")]
    pub sensitive_fields: Vec<String>,

    /// Deepest payload nesting the detector will traverse
    #[serde(default = "default_max_payload_depth")]
    pub max_payload_depth: usize,

    /// Default number of records returned by audit queries
    #[serde(default = "default_audit_log_limit")]
    pub audit_log_limit: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            log_audits: true,
            sensitive_fields: default_sensitive_fields(),
            max_payload_depth: DEFAULT_MAX_PAYLOAD_DEPTH,
            audit_log_limit: DEFAULT_AUDIT_LIMIT,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sensitive_fields() -> Vec<String> {
    DEFAULT_SENSITIVE_MARKERS
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn default_max_payload_depth() -> usize {
    DEFAULT_MAX_PAYLOAD_DEPTH
}

fn default_audit_log_limit() -> usize {
    DEFAULT_AUDIT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvaluatorConfig::default();
        assert!(config.log_audits);
        assert_eq!(config.sensitive_fields.len(), 12);
        assert_eq!(config.sensitive_fields[0], "cpf");
        assert_eq!(config.max_payload_depth, 512);
        assert_eq!(config.audit_log_limit, 10);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EvaluatorConfig =
            serde_json::from_str(r#"{"log_audits": false}"#).unwrap();
        assert!(!config.log_audits);
        assert_eq!(config.sensitive_fields, default_sensitive_fields());
        assert_eq!(config.audit_log_limit, 10);
    }

    #[test]
    fn test_sensitive_fields_override() {
        let config: EvaluatorConfig =
            serde_json::from_str(r#"{"sensitive_fields": ["ssn", "iban"]}"#).unwrap();
        assert_eq!(config.sensitive_fields, vec!["ssn", "iban"]);
        assert!(config.log_audits);
    }
}
