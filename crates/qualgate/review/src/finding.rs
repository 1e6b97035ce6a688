//! Worker output: findings and per-worker results.

use serde::{Deserialize, Serialize};

// ── Finding Severity ────────────────────────────────────────────────────

/// Severity as reported by a verification worker.
///
/// Distinct from [`qualgate_types::IssueSeverity`], which ranks remediation
/// work. The two are bridged only by [`crate::patch::escalate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

// ── Finding ─────────────────────────────────────────────────────────────

/// One concrete issue reported by one worker. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    pub severity: FindingSeverity,
    #[serde(default)]
    pub auto_fixable: bool,
}

impl Finding {
    pub fn new(
        file: impl Into<String>,
        message: impl Into<String>,
        severity: FindingSeverity,
    ) -> Self {
        Self {
            file: file.into(),
            line: None,
            column: None,
            message: message.into(),
            rule: None,
            severity,
            auto_fixable: false,
        }
    }

    /// Shorthand for an `error` finding.
    pub fn error(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(file, message, FindingSeverity::Error)
    }

    /// Shorthand for a `warning` finding.
    pub fn warning(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(file, message, FindingSeverity::Warning)
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    pub fn fixable(mut self) -> Self {
        self.auto_fixable = true;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == FindingSeverity::Error
    }
}

// ── Verdict ─────────────────────────────────────────────────────────────

/// Pass/fail outcome of a worker or of a whole review.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReviewVerdict {
    Pass,
    Fail,
}

impl std::fmt::Display for ReviewVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

// ── Worker Result ───────────────────────────────────────────────────────

/// One worker's output for one iteration.
///
/// Produced by a worker invocation, or copied forward unchanged (with
/// `skipped = true`) from a prior iteration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerResult {
    pub verdict: ReviewVerdict,
    #[serde(default)]
    pub skipped: bool,
    pub errors: u32,
    pub warnings: u32,
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl WorkerResult {
    /// A clean pass with no findings.
    pub fn pass() -> Self {
        Self {
            verdict: ReviewVerdict::Pass,
            skipped: false,
            errors: 0,
            warnings: 0,
            findings: vec![],
            duration_ms: None,
        }
    }

    /// Build a result from findings: counts are derived, and the worker fails
    /// when any finding is an error.
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let errors = saturating_count(findings.iter().filter(|f| f.is_error()).count());
        let warnings = saturating_count(
            findings
                .iter()
                .filter(|f| f.severity == FindingSeverity::Warning)
                .count(),
        );
        Self {
            verdict: if errors > 0 {
                ReviewVerdict::Fail
            } else {
                ReviewVerdict::Pass
            },
            skipped: false,
            errors,
            warnings,
            findings,
            duration_ms: None,
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// The same result marked as carried forward from a prior iteration.
    pub fn carried_forward(&self) -> Self {
        Self {
            skipped: true,
            ..self.clone()
        }
    }

    pub fn is_fail(&self) -> bool {
        self.verdict == ReviewVerdict::Fail
    }

    /// Number of findings the worker can fix on its own.
    pub fn auto_fixable_count(&self) -> u32 {
        saturating_count(self.findings.iter().filter(|f| f.auto_fixable).count())
    }
}

fn saturating_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
