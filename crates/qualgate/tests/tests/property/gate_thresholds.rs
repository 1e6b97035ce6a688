//! Property tests: the commitment gate agrees with its thresholds, and an
//! auto-approved override always opens a failed gate.

use proptest::prelude::*;
use qualgate_commitment::{
    check_blocker_count, check_readiness_threshold, check_unknown_count,
    validate_commitment_readiness, CommitmentGateConfig, GateRequirements, OverrideRequest,
    ReadinessResult,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn arb_requirements() -> impl Strategy<Value = GateRequirements> {
    (0u32..=100, 0u32..4, 0u32..8, any::<bool>()).prop_map(
        |(threshold, blockers, unknowns, allow)| {
            let requirements = GateRequirements::default()
                .with_readiness_threshold(threshold)
                .with_max_blockers(blockers)
                .with_max_unknowns(unknowns);
            if allow {
                requirements
            } else {
                requirements.without_override()
            }
        },
    )
}

fn arb_readiness() -> impl Strategy<Value = ReadinessResult> {
    (0u32..=100, 0u32..6, 0u32..12).prop_map(|(score, blockers, unknowns)| {
        ReadinessResult::new("flow-034", score, blockers, unknowns).unwrap()
    })
}

fn override_request() -> OverrideRequest {
    OverrideRequest::new(
        "lead@example.com",
        "Launch date agreed with partner",
        vec!["Scope may shift".to_string()],
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn readiness_check_is_inclusive_at_least(score in 0u32..=100, threshold in 0u32..=100) {
        let check = check_readiness_threshold(score, threshold);
        prop_assert_eq!(check.passed, score >= threshold);
        prop_assert_eq!(check.operator.symbol(), ">=");
        prop_assert!(check.is_consistent());
    }

    #[test]
    fn count_checks_are_inclusive_at_most(actual in 0u32..50, max in 0u32..50) {
        let blockers = check_blocker_count(actual, max);
        let unknowns = check_unknown_count(actual, max);
        prop_assert_eq!(blockers.passed, actual <= max);
        prop_assert_eq!(unknowns.passed, actual <= max);
        prop_assert_eq!(blockers.operator.symbol(), "<=");
        prop_assert!(blockers.is_consistent() && unknowns.is_consistent());
    }

    /// Without an override the gate passes exactly when every check passes.
    #[test]
    fn gate_passes_iff_all_checks_pass(
        readiness in arb_readiness(),
        requirements in arb_requirements(),
    ) {
        let config = CommitmentGateConfig::default().with_requirements(requirements.clone());
        let result = validate_commitment_readiness(&readiness, &config).unwrap();

        let expected = readiness.score >= requirements.readiness_threshold
            && readiness.factors.mvp_blocking_count <= requirements.max_blockers
            && readiness.factors.known_unknowns_count <= requirements.max_unknowns;
        prop_assert_eq!(result.passed, expected);
        prop_assert_eq!(result.total_checks, 3);
        prop_assert_eq!(
            result.passed_checks as usize,
            result.checks.iter().filter(|c| c.passed).count()
        );
        prop_assert_eq!(
            result.override_available,
            !result.passed && requirements.allow_override
        );
        prop_assert_eq!(
            result.summary.starts_with("COMMITMENT GATE: PASSED"),
            result.passed
        );
        prop_assert!(result.validate().is_ok());
    }

    /// An auto-approved override consumes availability and bypasses exactly
    /// the failing checks.
    #[test]
    fn override_opens_failed_gate(readiness in arb_readiness()) {
        let config = CommitmentGateConfig::default().with_override_request(override_request());
        let result = validate_commitment_readiness(&readiness, &config).unwrap();

        prop_assert!(result.passed);
        prop_assert!(!result.override_available);
        match &result.override_audit {
            Some(audit) => {
                prop_assert!(!result.all_checks_passed());
                prop_assert!(audit.approved());
                let failed: Vec<_> = result.failed_checks().cloned().collect();
                prop_assert_eq!(&audit.bypassed_checks, &failed);
                prop_assert!(audit.verify_digest());
            }
            None => {
                prop_assert!(result.all_checks_passed());
            }
        }
    }
}
