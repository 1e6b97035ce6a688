//! Individual gate checks.
//!
//! Each requirement owns its comparison. The operator label written into a
//! [`GateCheckResult`] is derived from that comparison, so the label and the
//! outcome cannot drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::readiness::ReadinessResult;
use crate::requirements::GateRequirements;

/// The three requirements a story must satisfy before commitment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    ReadinessScore,
    BlockerCount,
    UnknownCount,
}

impl Requirement {
    /// Evaluation order; checks are always reported in this order.
    pub const ALL: [Requirement; 3] = [
        Requirement::ReadinessScore,
        Requirement::BlockerCount,
        Requirement::UnknownCount,
    ];

    pub fn comparison(self) -> Comparison {
        match self {
            Requirement::ReadinessScore => Comparison::AtLeast,
            Requirement::BlockerCount | Requirement::UnknownCount => Comparison::AtMost,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Requirement::ReadinessScore => "readiness_score",
            Requirement::BlockerCount => "blocker_count",
            Requirement::UnknownCount => "unknown_count",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relational comparison between an actual value and a threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = ">=")]
    AtLeast,
    #[serde(rename = "<=")]
    AtMost,
    #[serde(rename = "==")]
    Exactly,
}

impl Comparison {
    pub fn holds(self, actual: u32, threshold: u32) -> bool {
        match self {
            Comparison::AtLeast => actual >= threshold,
            Comparison::AtMost => actual <= threshold,
            Comparison::Exactly => actual == threshold,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::AtLeast => ">=",
            Comparison::AtMost => "<=",
            Comparison::Exactly => "==",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Outcome of one requirement check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateCheckResult {
    pub requirement: Requirement,
    pub passed: bool,
    pub threshold: u32,
    pub actual: u32,
    pub operator: Comparison,
    pub description: String,
}

impl GateCheckResult {
    fn evaluate(
        requirement: Requirement,
        actual: u32,
        threshold: u32,
        describe: impl FnOnce(bool) -> String,
    ) -> Self {
        let operator = requirement.comparison();
        let passed = operator.holds(actual, threshold);
        Self {
            requirement,
            passed,
            threshold,
            actual,
            operator,
            description: describe(passed),
        }
    }

    /// True when the stored outcome agrees with the requirement's comparison.
    pub fn is_consistent(&self) -> bool {
        self.operator == self.requirement.comparison()
            && self.passed == self.operator.holds(self.actual, self.threshold)
    }
}

/// Score must be at least `threshold`.
pub fn check_readiness_threshold(score: u32, threshold: u32) -> GateCheckResult {
    GateCheckResult::evaluate(Requirement::ReadinessScore, score, threshold, |passed| {
        if passed {
            format!("Readiness score {score} meets threshold of {threshold}")
        } else {
            format!("Readiness score {score} is below required threshold of {threshold}")
        }
    })
}

/// Blockers must not exceed `max_blockers`.
pub fn check_blocker_count(blockers: u32, max_blockers: u32) -> GateCheckResult {
    GateCheckResult::evaluate(Requirement::BlockerCount, blockers, max_blockers, |passed| {
        if !passed {
            format!("{blockers} blocker(s) found, but maximum allowed is {max_blockers}")
        } else if max_blockers == 0 {
            "No blockers found (required: 0)".to_string()
        } else {
            format!("Blocker count {blockers} is within limit of {max_blockers}")
        }
    })
}

/// Unknowns must not exceed `max_unknowns`.
pub fn check_unknown_count(unknowns: u32, max_unknowns: u32) -> GateCheckResult {
    GateCheckResult::evaluate(Requirement::UnknownCount, unknowns, max_unknowns, |passed| {
        if passed {
            format!("Unknown count {unknowns} is within limit of {max_unknowns}")
        } else {
            format!("{unknowns} unknown(s) found, exceeds maximum of {max_unknowns}")
        }
    })
}

/// Run all three checks in [`Requirement::ALL`] order.
pub fn run_checks(
    readiness: &ReadinessResult,
    requirements: &GateRequirements,
) -> Vec<GateCheckResult> {
    Requirement::ALL
        .iter()
        .map(|requirement| match requirement {
            Requirement::ReadinessScore => {
                check_readiness_threshold(readiness.score, requirements.readiness_threshold)
            }
            Requirement::BlockerCount => check_blocker_count(
                readiness.factors.mvp_blocking_count,
                requirements.max_blockers,
            ),
            Requirement::UnknownCount => check_unknown_count(
                readiness.factors.known_unknowns_count,
                requirements.max_unknowns,
            ),
        })
        .collect()
}
