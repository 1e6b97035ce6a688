//! E2E: overrides that wait for an approver, tracked in the ledger.

use qualgate_commitment::{
    finalize_override, validate_commitment_readiness, ApprovalStatus, CommitmentError,
    CommitmentGateConfig, LedgerError, LedgerFilter, OverrideDecision, OverrideLedger,
    OverridePolicy, OverrideRequest, ReadinessResult,
};

fn pending_config() -> CommitmentGateConfig {
    let request = OverrideRequest::new(
        "dev@example.com",
        "Hotfix needed before the billing run",
        vec!["Unknowns not yet investigated".to_string()],
    )
    .unwrap();
    CommitmentGateConfig::default()
        .with_override_request(request)
        .with_override_policy(OverridePolicy::RequireApproval)
}

#[test]
fn approval_flow_through_ledger() {
    let mut ledger = OverrideLedger::new();
    let readiness = ReadinessResult::new("flow-101", 78, 0, 7).unwrap();

    let pending = validate_commitment_readiness(&readiness, &pending_config()).unwrap();
    assert!(!pending.passed);
    assert!(!pending.override_available);
    let opened = pending.override_audit.clone().unwrap();
    assert!(opened.is_pending());
    ledger.record(opened.clone()).unwrap();
    assert_eq!(ledger.pending().len(), 1);

    let approved = finalize_override(&pending, OverrideDecision::approve("eng-manager")).unwrap();
    assert!(approved.passed);
    assert!(approved.summary.starts_with("COMMITMENT GATE: PASSED (with override)"));
    let decided = approved.override_audit.clone().unwrap();
    assert_eq!(decided.audit_id, opened.audit_id);
    ledger.record_decision(decided).unwrap();

    assert!(ledger.pending().is_empty());
    assert_eq!(ledger.approved_count(), 1);
    let record = ledger.find(&opened.audit_id).unwrap();
    assert!(record.opened.is_pending());
    assert_eq!(record.current().approved_by(), Some("eng-manager"));
}

#[test]
fn rejection_keeps_gate_closed_and_allows_new_request() {
    let mut ledger = OverrideLedger::new();
    let readiness = ReadinessResult::new("flow-102", 78, 1, 2).unwrap();

    let pending = validate_commitment_readiness(&readiness, &pending_config()).unwrap();
    ledger.record(pending.override_audit.clone().unwrap()).unwrap();

    let rejected = finalize_override(
        &pending,
        OverrideDecision::reject("cto", "Blocker touches payments"),
    )
    .unwrap();
    assert!(!rejected.passed);
    assert!(rejected.override_available);
    ledger
        .record_decision(rejected.override_audit.clone().unwrap())
        .unwrap();

    let rejected_records =
        ledger.query(&LedgerFilter::new().with_status(ApprovalStatus::Rejected));
    assert_eq!(rejected_records.len(), 1);
    assert_eq!(ledger.approved_count(), 0);

    let err = finalize_override(&rejected, OverrideDecision::approve("cto")).unwrap_err();
    assert!(matches!(
        err,
        CommitmentError::InvalidApprovalTransition { .. }
    ));
}

#[test]
fn ledger_refuses_replays_and_forgeries() {
    let mut ledger = OverrideLedger::new();
    let readiness = ReadinessResult::new("flow-103", 50, 0, 0).unwrap();
    let pending = validate_commitment_readiness(&readiness, &pending_config()).unwrap();
    let opened = pending.override_audit.clone().unwrap();

    ledger.record(opened.clone()).unwrap();
    assert_eq!(
        ledger.record(opened.clone()),
        Err(LedgerError::DuplicateEntry(opened.audit_id.clone()))
    );

    let mut forged = finalize_override(&pending, OverrideDecision::approve("intern"))
        .unwrap()
        .override_audit
        .unwrap();
    forged.approval = qualgate_commitment::OverrideApproval::Approved {
        by: "cto".to_string(),
        at: forged.recorded_at,
    };
    assert!(matches!(
        ledger.record_decision(forged),
        Err(LedgerError::DigestMismatch(_))
    ));
    assert!(ledger.find(&opened.audit_id).unwrap().decision.is_none());
}

#[test]
fn stories_are_tracked_separately() {
    let mut ledger = OverrideLedger::new();
    for story in ["flow-201", "flow-202", "flow-201"] {
        let readiness = ReadinessResult::new(story, 70, 0, 0).unwrap();
        let result = validate_commitment_readiness(&readiness, &pending_config()).unwrap();
        ledger.record(result.override_audit.unwrap()).unwrap();
    }
    assert_eq!(ledger.len(), 3);
    assert_eq!(ledger.for_story("flow-201").len(), 2);
    assert_eq!(ledger.for_story("flow-202").len(), 1);
}
