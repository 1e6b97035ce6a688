//! E2E: commitment gate scenarios from readiness input to serialised result.

use qualgate_commitment::{
    validate_commitment_readiness, CommitmentGateConfig, CommitmentGateResult, OverrideRequest,
    ReadinessResult, Requirement,
};

fn override_request() -> OverrideRequest {
    OverrideRequest::new(
        "pm@example.com",
        "Customer commitment requires this sprint",
        vec![
            "Blockers may cause rework".to_string(),
            "Integration risk accepted".to_string(),
        ],
    )
    .unwrap()
}

#[test]
fn ready_story_clears_all_three_checks() {
    let readiness = ReadinessResult::new("flow-034", 90, 0, 3).unwrap();
    let result =
        validate_commitment_readiness(&readiness, &CommitmentGateConfig::default()).unwrap();

    assert!(result.passed);
    assert_eq!(result.passed_checks, 3);
    assert_eq!(result.total_checks, 3);
    assert!(!result.override_available);
    assert!(result.override_audit.is_none());
}

#[test]
fn unready_story_fails_with_override_offered() {
    let readiness = ReadinessResult::new("flow-034", 60, 2, 3).unwrap();
    let result =
        validate_commitment_readiness(&readiness, &CommitmentGateConfig::default()).unwrap();

    assert!(!result.passed);
    assert_eq!(result.passed_checks, 1);
    let passing: Vec<_> = result
        .checks
        .iter()
        .filter(|c| c.passed)
        .map(|c| c.requirement)
        .collect();
    assert_eq!(passing, vec![Requirement::UnknownCount]);
    assert!(result.override_available);
    assert!(result.summary.contains("COMMITMENT GATE: FAILED"));
    assert!(result.summary.contains("1/3 requirements met."));
    assert!(result
        .summary
        .contains("- Readiness score 60 is below required threshold of 85"));
    assert!(result
        .summary
        .contains("- 2 blocker(s) found, but maximum allowed is 0"));
}

#[test]
fn unready_story_with_override_passes_and_is_audited() {
    let readiness = ReadinessResult::new("flow-034", 60, 2, 3).unwrap();
    let config = CommitmentGateConfig::default().with_override_request(override_request());
    let result = validate_commitment_readiness(&readiness, &config).unwrap();

    assert!(result.passed);
    assert!(!result.override_available);
    let audit = result.override_audit.as_ref().unwrap();
    assert!(audit.approved());
    assert_eq!(audit.bypassed_checks.len(), 2);
    assert_eq!(audit.score_at_override, 60);
    assert_eq!(result.override_request.as_ref(), Some(&audit.request));
    assert!(result
        .summary
        .contains("Gate requirements were bypassed via approved override."));
}

#[test]
fn gate_result_survives_json_exchange() {
    let upstream = r#"{
        "storyId": "flow-034",
        "analyzedAt": "2026-03-02T09:30:00Z",
        "score": 60,
        "ready": false,
        "threshold": 85,
        "factors": {
            "mvpBlockingCount": 2,
            "mvpImportantCount": 4,
            "knownUnknownsCount": 3,
            "hasStrongContext": true,
            "hasBaselineAlignment": false,
            "totalGapsAnalyzed": 11,
            "acCoverage": 0.75
        },
        "summary": "Two MVP blockers outstanding",
        "confidence": "high"
    }"#;
    let readiness = ReadinessResult::from_json(upstream).unwrap();
    let config = CommitmentGateConfig::default().with_override_request(override_request());
    let result = validate_commitment_readiness(&readiness, &config).unwrap();

    let json = result.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["schema"], 1);
    assert_eq!(value["passedChecks"], 1);
    assert_eq!(value["overrideAudit"]["approval"]["status"], "approved");
    assert_eq!(value["overrideAudit"]["approval"]["by"], "system");
    assert_eq!(value["checks"][1]["operator"], "<=");

    let parsed = CommitmentGateResult::from_json(&json).unwrap();
    assert_eq!(parsed, result);
}

#[test]
fn edited_audit_is_rejected_on_parse() {
    let readiness = ReadinessResult::new("flow-034", 60, 2, 3).unwrap();
    let config = CommitmentGateConfig::default().with_override_request(override_request());
    let result = validate_commitment_readiness(&readiness, &config).unwrap();

    let mut value = serde_json::to_value(&result).unwrap();
    value["overrideAudit"]["scoreAtOverride"] = serde_json::json!(95);
    let json = serde_json::to_string(&value).unwrap();
    assert!(CommitmentGateResult::from_json(&json).is_err());
}

#[test]
fn unknown_schema_is_rejected() {
    let readiness = ReadinessResult::new("flow-034", 90, 0, 3).unwrap();
    let result =
        validate_commitment_readiness(&readiness, &CommitmentGateConfig::default()).unwrap();
    let mut value = serde_json::to_value(&result).unwrap();
    value["schema"] = serde_json::json!(2);
    let json = serde_json::to_string(&value).unwrap();
    assert!(CommitmentGateResult::from_json(&json).is_err());
}
