//! Append-only, in-memory audit trail of compliance evaluations.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::policy::OperationKind;

/// Default number of records returned by [`AuditTrail::recent`].
pub const DEFAULT_AUDIT_LIMIT: usize = 10;

/// One evaluation against a recognized operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub operation: OperationKind,
    pub timestamp: DateTime<Utc>,
    pub compliant: bool,
    pub sensitive_data: bool,
}

impl AuditRecord {
    pub fn new(
        operation: OperationKind,
        timestamp: DateTime<Utc>,
        compliant: bool,
        sensitive_data: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation,
            timestamp,
            compliant,
            sensitive_data,
        }
    }
}

/// Audit trail shared between concurrent evaluators.
///
/// Appends are serialized by the write lock; readers sort a snapshot taken
/// under the read lock, so a query never observes a partial append.
#[derive(Debug, Default)]
pub struct AuditTrail {
    records: RwLock<Vec<AuditRecord>>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, record: AuditRecord) {
        self.records.write().push(record);
    }

    /// The `limit` most recent records, newest first. Records with equal
    /// timestamps are returned most-recently-appended first.
    pub fn recent(&self, limit: usize) -> Vec<AuditRecord> {
        let mut indexed: Vec<(usize, AuditRecord)> = {
            let records = self.records.read();
            records.iter().cloned().enumerate().collect()
        };

        indexed.sort_by(|(ia, a), (ib, b)| {
            b.timestamp.cmp(&a.timestamp).then_with(|| ib.cmp(ia))
        });

        indexed
            .into_iter()
            .take(limit)
            .map(|(_, record)| record)
            .collect()
    }

    /// All records in insertion order.
    pub fn snapshot(&self) -> Vec<AuditRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
