use thiserror::Error;

/// Errors raised while evaluating a compliance request.
///
/// These never cross the public evaluation API: [`crate::Evaluator`] and
/// [`crate::ComplianceChecker`] fold them into non-compliant results.
#[derive(Error, Debug)]
pub enum ComplianceError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("malformed payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ComplianceError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ComplianceError>;
