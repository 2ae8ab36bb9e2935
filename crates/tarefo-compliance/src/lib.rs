//! # tarefo-compliance
//!
//! Privacy-compliance evaluator for data-lifecycle operations.
//!
//! Given an operation (`store`, `process`, `share`, `delete`) and a JSON
//! payload, the [`Evaluator`] checks that every rule the policy table
//! requires for the operation is affirmed with a boolean `true`, scans the
//! payload for sensitive-data markers, and returns an [`EvaluationResult`]
//! with per-rule checks and remediation text. Each evaluation of a
//! recognized operation is appended to an in-memory [`AuditTrail`].
//!
//! The rule set is an illustrative LGPD/GDPR-style policy table, not a legal
//! engine.
//!
//! ## Components
//!
//! - [`PolicyTable`] / [`RuleId`] / [`OperationKind`]: which rules each
//!   operation requires, with descriptions and recommendations
//! - [`SensitiveMarkerSet`]: marker substring scan over a flattened payload
//! - [`Evaluator`]: rule evaluation and audit trail ownership
//! - [`ComplianceChecker`]: JSON text boundary for the orchestration layer
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use tarefo_compliance::Evaluator;
//!
//! let evaluator = Evaluator::new();
//! let result = evaluator.evaluate(
//!     "store",
//!     &json!({
//!         "consent_obtained": true,
//!         "necessary_data_only": true,
//!         "secure_storage": true,
//!         "data_retention_policy": false,
//!         "cpf": "123.456.789-00"
//!     }),
//! );
//!
//! assert!(!result.compliant);
//! assert_eq!(result.sensitive_types, vec!["cpf"]);
//! assert_eq!(result.recommendations.len(), 2);
//! ```
//!
//! Evaluation never fails: unknown operations and malformed payloads are
//! reported as non-compliant results with a `reason`.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod audit;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod facade;
pub mod policy;
pub mod sensitive;

pub use audit::{AuditRecord, AuditTrail, DEFAULT_AUDIT_LIMIT};
pub use config::EvaluatorConfig;
pub use error::{ComplianceError, Result};
pub use evaluator::{CheckOutcome, EvaluationResult, Evaluator};
pub use facade::{ComplianceChecker, ComplianceRequest};
pub use policy::{OperationKind, PolicyTable, RuleId};
pub use sensitive::{Detection, SensitiveMarkerSet, DEFAULT_SENSITIVE_MARKERS};

/// Evaluate with a throwaway evaluator and return the verdict as JSON text.
///
/// Convenience for one-shot callers; the audit record is discarded with the
/// evaluator.
pub fn check_compliance(
    operation: &str,
    data: &serde_json::Value,
    include_recommendations: bool,
) -> String {
    ComplianceChecker::default().run(operation, data, include_recommendations)
}
