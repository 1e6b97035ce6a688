//! Append-only ledger of override audit entries.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::approval::{OverrideApproval, OverrideAuditEntry};
use crate::error::LedgerError;

/// One override in the ledger: the entry as first recorded plus, once
/// taken, the sealed decision.
///
/// `opened` is never modified. A decision can be appended exactly once and
/// only while `opened` is pending.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRecord {
    pub opened: OverrideAuditEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<OverrideAuditEntry>,
}

impl LedgerRecord {
    /// Latest state of this override.
    pub fn current(&self) -> &OverrideAuditEntry {
        self.decision.as_ref().unwrap_or(&self.opened)
    }

    pub fn audit_id(&self) -> &str {
        &self.opened.audit_id
    }

    pub fn story_id(&self) -> &str {
        &self.opened.story_id
    }
}

/// Which approval state a filter selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    fn of(approval: &OverrideApproval) -> Self {
        match approval {
            OverrideApproval::Pending => ApprovalStatus::Pending,
            OverrideApproval::Approved { .. } => ApprovalStatus::Approved,
            OverrideApproval::Rejected { .. } => ApprovalStatus::Rejected,
        }
    }
}

/// Filter for querying the ledger.
#[derive(Clone, Debug, Default)]
pub struct LedgerFilter {
    pub story_id: Option<String>,
    pub status: Option<ApprovalStatus>,
}

impl LedgerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_story(mut self, story_id: impl Into<String>) -> Self {
        self.story_id = Some(story_id.into());
        self
    }

    pub fn with_status(mut self, status: ApprovalStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, record: &LedgerRecord) -> bool {
        if let Some(ref story_id) = self.story_id {
            if record.story_id() != story_id {
                return false;
            }
        }
        if let Some(status) = self.status {
            if ApprovalStatus::of(&record.current().approval) != status {
                return false;
            }
        }
        true
    }
}

/// Append-only record of every override taken on the commitment gate.
///
/// There are no delete or modify operations. Entries whose digest does not
/// match their contents are refused.
#[derive(Debug, Default)]
pub struct OverrideLedger {
    records: Vec<LedgerRecord>,
}

impl OverrideLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly created audit entry.
    pub fn record(&mut self, entry: OverrideAuditEntry) -> Result<(), LedgerError> {
        if !entry.verify_digest() {
            return Err(LedgerError::DigestMismatch(entry.audit_id));
        }
        if self.find(&entry.audit_id).is_some() {
            return Err(LedgerError::DuplicateEntry(entry.audit_id));
        }
        debug!(
            audit_id = %entry.audit_id,
            story_id = %entry.story_id,
            status = entry.approval.label(),
            "Override recorded in ledger"
        );
        self.records.push(LedgerRecord {
            opened: entry,
            decision: None,
        });
        Ok(())
    }

    /// Append the decided form of a pending override.
    ///
    /// The decided entry must keep the original request and bypassed checks.
    pub fn record_decision(&mut self, decided: OverrideAuditEntry) -> Result<(), LedgerError> {
        if !decided.verify_digest() {
            return Err(LedgerError::DigestMismatch(decided.audit_id));
        }
        if decided.is_pending() {
            return Err(LedgerError::UndecidedEntry(decided.audit_id));
        }
        let record = self
            .records
            .iter_mut()
            .find(|r| r.opened.audit_id == decided.audit_id)
            .ok_or_else(|| LedgerError::NotFound(decided.audit_id.clone()))?;

        if !record.current().is_pending() {
            return Err(LedgerError::AlreadyDecided(decided.audit_id));
        }
        if record.opened.request != decided.request
            || record.opened.bypassed_checks != decided.bypassed_checks
            || record.opened.story_id != decided.story_id
            || record.opened.score_at_override != decided.score_at_override
        {
            return Err(LedgerError::ImmutabilityViolation(decided.audit_id));
        }

        debug!(
            audit_id = %decided.audit_id,
            status = decided.approval.label(),
            "Override decision recorded in ledger"
        );
        record.decision = Some(decided);
        Ok(())
    }

    pub fn find(&self, audit_id: &str) -> Option<&LedgerRecord> {
        self.records.iter().find(|r| r.audit_id() == audit_id)
    }

    pub fn query(&self, filter: &LedgerFilter) -> Vec<&LedgerRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    pub fn for_story(&self, story_id: &str) -> Vec<&LedgerRecord> {
        self.query(&LedgerFilter::new().with_story(story_id))
    }

    pub fn pending(&self) -> Vec<&LedgerRecord> {
        self.query(&LedgerFilter::new().with_status(ApprovalStatus::Pending))
    }

    pub fn approved_count(&self) -> usize {
        self.records.iter().filter(|r| r.current().approved()).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
