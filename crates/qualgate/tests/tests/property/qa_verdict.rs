//! Property tests: QA verdict precedence and the success predicate.

use proptest::prelude::*;
use qualgate_qa::{AcStatus, AcVerification, QaIssue, QaVerdict, QaVerify};
use qualgate_types::IssueSeverity;

fn arb_status() -> impl Strategy<Value = AcStatus> {
    prop_oneof![
        Just(AcStatus::Pass),
        Just(AcStatus::Fail),
        Just(AcStatus::Blocked),
    ]
}

fn arb_issue_severity() -> impl Strategy<Value = IssueSeverity> {
    prop_oneof![
        Just(IssueSeverity::Critical),
        Just(IssueSeverity::High),
        Just(IssueSeverity::Medium),
        Just(IssueSeverity::Low),
    ]
}

fn build_qa(statuses: &[AcStatus], severities: &[IssueSeverity]) -> QaVerify {
    let mut qa = QaVerify::new("flow-034").unwrap();
    for (i, status) in statuses.iter().enumerate() {
        qa.add_ac_verification(AcVerification::new(format!("AC{}", i + 1), *status))
            .unwrap();
    }
    for (i, severity) in severities.iter().enumerate() {
        qa.add_issue(QaIssue::new(format!("Q{}", i + 1), *severity, "found in QA"))
            .unwrap();
    }
    qa
}

proptest! {
    #[test]
    fn verdict_follows_precedence(
        statuses in prop::collection::vec(arb_status(), 0..8),
    ) {
        let qa = build_qa(&statuses, &[]);
        let expected = if statuses.contains(&AcStatus::Blocked) {
            QaVerdict::Blocked
        } else if statuses.contains(&AcStatus::Fail) {
            QaVerdict::Fail
        } else {
            QaVerdict::Pass
        };
        prop_assert_eq!(qa.calculate_verdict(), expected);
    }

    /// Success implies a PASS verdict, all ACs passing and no blocking
    /// issues, whatever the inputs.
    #[test]
    fn success_requires_every_condition(
        statuses in prop::collection::vec(arb_status(), 0..6),
        severities in prop::collection::vec(arb_issue_severity(), 0..4),
        compliant in any::<bool>(),
    ) {
        let mut qa = build_qa(&statuses, &severities);
        qa.set_architecture_compliant(compliant);
        qa.apply_verdict();

        let expected = statuses.iter().all(|s| *s == AcStatus::Pass)
            && compliant
            && !severities.iter().any(|s| s.is_blocking());
        prop_assert_eq!(qa.qa_passed_successfully(), expected);
    }

    #[test]
    fn summary_reports_counts(
        statuses in prop::collection::vec(arb_status(), 0..6),
        severities in prop::collection::vec(arb_issue_severity(), 0..4),
    ) {
        let mut qa = build_qa(&statuses, &severities);
        qa.apply_verdict();
        let passed = statuses.iter().filter(|s| **s == AcStatus::Pass).count();
        let critical = severities.iter().filter(|s| **s == IssueSeverity::Critical).count();
        let high = severities.iter().filter(|s| **s == IssueSeverity::High).count();
        prop_assert_eq!(
            qa.generate_qa_summary(),
            format!(
                "QA {}: {}/{} ACs passed, {} critical, {} high issues",
                qa.verdict,
                passed,
                statuses.len(),
                critical,
                high
            )
        );
    }
}
