//! Property tests: review aggregation keeps its totals, verdict and
//! remediation ranking consistent with the recorded worker results.

use proptest::prelude::*;
use qualgate_review::{Finding, FindingSeverity, Review, ReviewVerdict, WorkerResult};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn arb_severity() -> impl Strategy<Value = FindingSeverity> {
    prop_oneof![
        Just(FindingSeverity::Error),
        Just(FindingSeverity::Warning),
        Just(FindingSeverity::Info),
    ]
}

fn arb_finding() -> impl Strategy<Value = Finding> {
    ("[a-z]{1,8}\\.ts", "[a-z ]{1,24}", arb_severity(), any::<bool>()).prop_map(
        |(file, message, severity, fixable)| {
            let finding = Finding::new(file, message, severity);
            if fixable {
                finding.fixable()
            } else {
                finding
            }
        },
    )
}

fn arb_worker_result() -> impl Strategy<Value = WorkerResult> {
    prop::collection::vec(arb_finding(), 0..6).prop_map(WorkerResult::from_findings)
}

fn arb_worker_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("lint".to_string()),
        Just("types".to_string()),
        Just("security".to_string()),
        Just("build".to_string()),
        Just("tests".to_string()),
    ]
}

/// A sequence of fresh runs and carry-forwards.
fn arb_operations() -> impl Strategy<Value = Vec<(String, WorkerResult, bool)>> {
    prop::collection::vec((arb_worker_name(), arb_worker_result(), any::<bool>()), 0..12)
}

fn build_review(ops: &[(String, WorkerResult, bool)]) -> Review {
    let mut review = Review::first("flow-034").unwrap();
    for (worker, result, carry) in ops {
        if *carry {
            review.carry_forward_worker(worker.clone(), result).unwrap();
        } else {
            review.add_worker_result(worker.clone(), result.clone()).unwrap();
        }
    }
    review.finalize();
    review
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// After finalize, totals equal the sums over the findings map.
    #[test]
    fn finalized_totals_match_findings(ops in arb_operations()) {
        let review = build_review(&ops);
        let errors: u32 = review.findings.values().map(|r| r.errors).sum();
        let warnings: u32 = review.findings.values().map(|r| r.warnings).sum();
        let fixable: u32 = review.findings.values().map(|r| r.auto_fixable_count()).sum();
        prop_assert_eq!(review.total_errors, errors);
        prop_assert_eq!(review.total_warnings, warnings);
        prop_assert_eq!(review.auto_fixable_count, fixable);
        prop_assert!(review.validate().is_ok());
    }

    /// The verdict is FAIL exactly when some recorded worker failed.
    #[test]
    fn verdict_reflects_any_failure(ops in arb_operations()) {
        let review = build_review(&ops);
        let any_fail = review.findings.values().any(|r| r.is_fail());
        prop_assert_eq!(review.verdict == ReviewVerdict::Fail, any_fail);
    }

    /// Once a review has failed, fresh results from other workers cannot
    /// bring it back to PASS.
    #[test]
    fn failure_is_sticky_across_other_workers(
        extra in prop::collection::vec(arb_worker_result(), 0..5),
    ) {
        let mut review = Review::first("flow-034").unwrap();
        let failing = WorkerResult::from_findings(vec![Finding::error("a.ts", "boom")]);
        review.add_worker_result("gate", failing).unwrap();
        for (i, result) in extra.into_iter().enumerate() {
            review.add_worker_result(format!("worker-{i}"), result).unwrap();
            prop_assert_eq!(review.verdict, ReviewVerdict::Fail);
        }
    }

    /// Carrying the same worker forward twice changes nothing but the
    /// timestamp.
    #[test]
    fn carry_forward_is_idempotent(
        ops in arb_operations(),
        worker in arb_worker_name(),
        previous in arb_worker_result(),
    ) {
        let mut once = build_review(&ops);
        once.carry_forward_worker(worker.clone(), &previous).unwrap();
        let mut twice = once.clone();
        twice.carry_forward_worker(worker, &previous).unwrap();
        twice.timestamp = once.timestamp;
        prop_assert_eq!(once, twice);
    }

    /// Patches are sorted by severity rank and then by discovery order, and
    /// come only from error findings of failing workers.
    #[test]
    fn ranked_patches_are_ordered(ops in arb_operations()) {
        let review = build_review(&ops);
        let expected: usize = review
            .findings
            .values()
            .filter(|r| r.is_fail())
            .map(|r| r.findings.iter().filter(|f| f.is_error()).count())
            .sum();
        prop_assert_eq!(review.ranked_patches.len(), expected);

        for pair in review.ranked_patches.windows(2) {
            let a = (pair[0].severity.rank(), pair[0].priority);
            let b = (pair[1].severity.rank(), pair[1].priority);
            prop_assert!(a < b);
        }
        prop_assert!(review.ranked_patches.iter().all(|p| p.priority >= 1));
    }

    /// A review that passed has nothing to fix.
    #[test]
    fn passing_review_has_no_patches(ops in arb_operations()) {
        let review = build_review(&ops);
        if review.is_pass() {
            prop_assert!(review.ranked_patches.is_empty());
            prop_assert!(review.failed_workers().is_empty());
        }
    }
}
