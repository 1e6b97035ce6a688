//! Ranked remediation patches derived from failing workers.
//!
//! Patches are never stored independently: they are recomputed from
//! `Review::findings` on demand. Only `error` findings of workers whose
//! verdict is FAIL become patches; warnings, even auto-fixable ones, are
//! left out so the remediation list targets hard failures only.

use qualgate_types::IssueSeverity;
use serde::{Deserialize, Serialize};

use crate::finding::FindingSeverity;
use crate::review::Review;

/// A prioritised remediation unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPatch {
    /// 1-based position in discovery order.
    pub priority: u32,
    pub file: String,
    /// The finding's message.
    pub issue: String,
    pub severity: IssueSeverity,
    pub auto_fixable: bool,
    /// Worker that reported the finding.
    pub worker: String,
}

/// Severity escalation policy: maps a worker's finding severity onto the
/// remediation vocabulary. Total over both enums.
pub fn escalate(severity: FindingSeverity) -> IssueSeverity {
    match severity {
        FindingSeverity::Error => IssueSeverity::High,
        FindingSeverity::Warning => IssueSeverity::Medium,
        FindingSeverity::Info => IssueSeverity::Low,
    }
}

/// Build the remediation list for a review.
///
/// Workers are visited in the order they were recorded on the review. The
/// result is stable-sorted by severity rank, then by discovery priority.
/// Returns an empty list when no worker failed.
pub fn generate_ranked_patches(review: &Review) -> Vec<RankedPatch> {
    let mut patches = Vec::new();
    let mut priority = 0u32;

    for (worker, result) in review.ordered_results() {
        if !result.is_fail() {
            continue;
        }
        for finding in result.findings.iter().filter(|f| f.is_error()) {
            priority += 1;
            patches.push(RankedPatch {
                priority,
                file: finding.file.clone(),
                issue: finding.message.clone(),
                severity: escalate(finding.severity),
                auto_fixable: finding.auto_fixable,
                worker: worker.to_string(),
            });
        }
    }

    patches.sort_by_key(|p| (p.severity.rank(), p.priority));
    patches
}
