//! E2E: QA verification from first AC to a serialised verdict.

use qualgate_qa::{
    AcVerification, Lesson, LessonCategory, QaIssue, QaVerdict, QaVerify, QualityRating,
    TestCounts, TestQuality, TestResults,
};
use qualgate_types::IssueSeverity;

#[test]
fn one_failed_ac_fails_qa() {
    let mut qa = QaVerify::new("flow-034").unwrap();
    qa.add_ac_verification(AcVerification::pass("AC1")).unwrap();
    qa.add_ac_verification(AcVerification::fail("AC2")).unwrap();
    qa.apply_verdict();

    assert_eq!(qa.verdict, QaVerdict::Fail);
    assert!(!qa.qa_passed_successfully());
    let summary = qa.generate_qa_summary();
    assert!(summary.contains("QA FAIL"));
    assert!(summary.contains("1/2 ACs passed"));
}

#[test]
fn full_qa_pass_with_evidence() {
    let mut qa = QaVerify::new("flow-034").unwrap();
    qa.add_ac_verification(
        AcVerification::pass("AC1")
            .with_text("Invoice totals include tax")
            .with_evidence("ci/run/8812#invoice_totals"),
    )
    .unwrap();
    qa.add_ac_verification(AcVerification::blocked("AC2").with_notes("sandbox offline"))
        .unwrap();
    qa.record_test_results(
        TestResults::default()
            .with_unit(TestCounts::new(128, 0))
            .with_integration(TestCounts::new(14, 0))
            .with_http(TestCounts::new(6, 0)),
    );
    qa.record_test_quality(TestQuality {
        rating: QualityRating::Adequate,
        concerns: vec!["No negative-path HTTP tests".to_string()],
    });
    qa.record_coverage(86.4, 80.0).unwrap();
    qa.add_issue(
        QaIssue::new("Q1", IssueSeverity::Low, "Log line is noisy")
            .in_file("src/invoice.rs")
            .with_suggested_fix("Downgrade to debug"),
    )
    .unwrap();
    qa.record_lesson(
        Lesson::new("Stub the tax service in CI", LessonCategory::TimeSink).with_tag("ci"),
    )
    .unwrap();

    assert_eq!(qa.apply_verdict(), QaVerdict::Blocked);
    assert!(!qa.qa_passed_successfully());

    // The sandbox comes back and AC2 is re-verified.
    qa.add_ac_verification(AcVerification::pass("AC2").with_evidence("manual/2026-03-03"))
        .unwrap();
    assert_eq!(qa.apply_verdict(), QaVerdict::Pass);
    assert!(qa.qa_passed_successfully());
    assert!(qa.tests_executed);
    assert_eq!(qa.coverage_meets_threshold, Some(true));
    assert_eq!(
        qa.generate_qa_summary(),
        "QA PASS: 2/2 ACs passed, 0 critical, 0 high issues"
    );

    let json = qa.to_json().unwrap();
    let parsed = QaVerify::from_json(&json).unwrap();
    assert_eq!(parsed, qa);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["verdict"], "PASS");
    assert_eq!(value["lessons_to_record"][0]["category"], "time_sink");
    assert_eq!(value["issues"][0]["severity"], "low");
}

#[test]
fn critical_issue_blocks_ship_despite_passing_acs() {
    let mut qa = QaVerify::new("flow-035").unwrap();
    qa.add_ac_verification(AcVerification::pass("AC1")).unwrap();
    qa.add_issue(
        QaIssue::new("Q9", IssueSeverity::Critical, "Refund issued twice").for_ac("AC1"),
    )
    .unwrap();
    qa.apply_verdict();

    assert_eq!(qa.verdict, QaVerdict::Pass);
    assert!(!qa.qa_passed_successfully());
    assert_eq!(qa.issue_counts().critical, 1);
    assert_eq!(
        qa.generate_qa_summary(),
        "QA PASS: 1/1 ACs passed, 1 critical, 0 high issues"
    );
}
