//! Policy table: which rules each data-lifecycle operation must satisfy.
//!
//! The table is illustrative, not a legal engine. Rules are a closed set so
//! that a misspelled rule name is a compile error rather than a silently
//! failing lookup.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ComplianceError;

/// A data-lifecycle action a compliance check applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Store,
    Process,
    Share,
    Delete,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Store,
        OperationKind::Process,
        OperationKind::Share,
        OperationKind::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Store => "store",
            OperationKind::Process => "process",
            OperationKind::Share => "share",
            OperationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = ComplianceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "store" => Ok(OperationKind::Store),
            "process" => Ok(OperationKind::Process),
            "share" => Ok(OperationKind::Share),
            "delete" => Ok(OperationKind::Delete),
            other => Err(ComplianceError::UnknownOperation(other.to_string())),
        }
    }
}

/// A named precondition that the payload must affirm with a boolean `true`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    ConsentObtained,
    NecessaryDataOnly,
    SecureStorage,
    DataRetentionPolicy,
    LegitimatePurpose,
    DataMinimization,
    AccessControls,
    ExplicitConsentForSharing,
    RecipientCompliance,
    DataTransferAgreement,
    IdentityVerified,
    CompleteErasure,
    ThirdPartyNotification,
    /// Synthetic rule, added only when the payload carries sensitive data.
    SensitiveDataHandling,
}

impl RuleId {
    /// Payload key that answers this rule.
    pub fn key(&self) -> &'static str {
        match self {
            RuleId::ConsentObtained => "consent_obtained",
            RuleId::NecessaryDataOnly => "necessary_data_only",
            RuleId::SecureStorage => "secure_storage",
            RuleId::DataRetentionPolicy => "data_retention_policy",
            RuleId::LegitimatePurpose => "legitimate_purpose",
            RuleId::DataMinimization => "data_minimization",
            RuleId::AccessControls => "access_controls",
            RuleId::ExplicitConsentForSharing => "explicit_consent_for_sharing",
            RuleId::RecipientCompliance => "recipient_compliance",
            RuleId::DataTransferAgreement => "data_transfer_agreement",
            RuleId::IdentityVerified => "identity_verified",
            RuleId::CompleteErasure => "complete_erasure",
            RuleId::ThirdPartyNotification => "third_party_notification",
            RuleId::SensitiveDataHandling => "sensitive_data_handling",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RuleId::ConsentObtained => "Explicit user consent for processing the data",
            RuleId::NecessaryDataOnly => "Only the data necessary for the declared purpose",
            RuleId::SecureStorage => "Secure storage with encryption and access controls",
            RuleId::DataRetentionPolicy => "Data retention policy defined and enforced",
            RuleId::LegitimatePurpose => "Legitimate and declared purpose for processing",
            RuleId::DataMinimization => "Data minimization, processing only what is needed",
            RuleId::AccessControls => "Access controls implemented and audited",
            RuleId::ExplicitConsentForSharing => "Specific consent for sharing",
            RuleId::RecipientCompliance => "Recipient compliant with LGPD/GDPR",
            RuleId::DataTransferAgreement => "Data transfer agreement in place",
            RuleId::IdentityVerified => "Identity of the data subject verified",
            RuleId::CompleteErasure => "Complete erasure of the data from every system",
            RuleId::ThirdPartyNotification => "Third parties notified about the erasure",
            RuleId::SensitiveDataHandling => {
                "Sensitive data requires special handling under LGPD/GDPR"
            }
        }
    }

    /// Remediation text reported when the rule fails.
    pub fn recommendation(&self) -> &'static str {
        match self {
            RuleId::ConsentObtained => {
                "Implement an explicit consent mechanism before processing the data"
            }
            RuleId::NecessaryDataOnly => {
                "Review the collected data to make sure only what is necessary is requested"
            }
            RuleId::SecureStorage => {
                "Implement adequate encryption and access controls for storage"
            }
            RuleId::DataRetentionPolicy => {
                "Establish a clear data retention policy and deletion mechanisms"
            }
            RuleId::LegitimatePurpose => {
                "Document and clearly communicate the purpose of the data processing"
            }
            RuleId::DataMinimization => {
                "Process only the data required to reach the declared goal"
            }
            RuleId::AccessControls => {
                "Implement role-based access controls and log every access"
            }
            RuleId::ExplicitConsentForSharing => {
                "Obtain specific consent for sharing before transferring data"
            }
            RuleId::RecipientCompliance => "Verify that the recipient is compliant with LGPD/GDPR",
            RuleId::DataTransferAgreement => "Establish a formal data transfer agreement",
            RuleId::IdentityVerified => "Implement a robust identity verification process",
            RuleId::CompleteErasure => {
                "Ensure erasure is complete across all systems and backups"
            }
            RuleId::ThirdPartyNotification => {
                "Notify every third party that received the data about the erasure"
            }
            RuleId::SensitiveDataHandling => {
                "Apply special handling to sensitive data, including explicit consent and reinforced security measures"
            }
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Required rules per operation, in evaluation order.
#[derive(Clone, Debug)]
pub struct PolicyTable {
    rules: BTreeMap<OperationKind, Vec<RuleId>>,
}

impl PolicyTable {
    /// The built-in LGPD/GDPR-inspired table.
    pub fn standard() -> Self {
        use RuleId::*;

        let mut rules = BTreeMap::new();
        rules.insert(
            OperationKind::Store,
            vec![
                ConsentObtained,
                NecessaryDataOnly,
                SecureStorage,
                DataRetentionPolicy,
            ],
        );
        rules.insert(
            OperationKind::Process,
            vec![
                ConsentObtained,
                LegitimatePurpose,
                NecessaryDataOnly,
                DataMinimization,
                AccessControls,
            ],
        );
        rules.insert(
            OperationKind::Share,
            vec![
                ConsentObtained,
                ExplicitConsentForSharing,
                LegitimatePurpose,
                RecipientCompliance,
                DataTransferAgreement,
            ],
        );
        rules.insert(
            OperationKind::Delete,
            vec![IdentityVerified, CompleteErasure, ThirdPartyNotification],
        );

        Self { rules }
    }

    /// Rules required for `operation`. Empty if the table has no entry.
    pub fn rules_for(&self, operation: OperationKind) -> &[RuleId] {
        self.rules
            .get(&operation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve an operation name against the table.
    pub fn resolve(&self, operation: &str) -> Result<OperationKind, ComplianceError> {
        let kind: OperationKind = operation.parse()?;
        if self.rules.contains_key(&kind) {
            Ok(kind)
        } else {
            Err(ComplianceError::UnknownOperation(operation.to_string()))
        }
    }

    pub fn operations(&self) -> impl Iterator<Item = OperationKind> + '_ {
        self.rules.keys().copied()
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::standard()
    }
}
