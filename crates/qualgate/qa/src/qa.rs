//! The QA verification record.

use qualgate_types::{validate, IssueSeverity, SchemaVersion, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

use crate::error::{QaError, QaResult};
use crate::issue::{IssueCounts, Lesson, QaIssue};
use crate::testing::{TestQuality, TestResults};
use crate::verification::{AcStatus, AcVerification, QaVerdict};

/// QA outcome for one story.
///
/// Starts `BLOCKED` with no tests executed, and evolves through AC upserts
/// and verdict recalculation until a downstream stage reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QaVerify {
    pub schema: SchemaVersion,
    pub story_id: String,
    pub timestamp: Timestamp,
    pub verdict: QaVerdict,
    pub tests_executed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_results: Option<TestResults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_meets_threshold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_quality: Option<TestQuality>,
    #[serde(default)]
    pub acs_verified: Vec<AcVerification>,
    pub architecture_compliant: bool,
    #[serde(default)]
    pub issues: Vec<QaIssue>,
    #[serde(default)]
    pub lessons_to_record: Vec<Lesson>,
}

impl QaVerify {
    /// Fresh record: `BLOCKED`, nothing executed, architecture assumed
    /// compliant.
    pub fn new(story_id: impl Into<String>) -> QaResult<Self> {
        let story_id = story_id.into();
        validate::non_empty("story_id", &story_id)?;
        Ok(Self {
            schema: SchemaVersion::V1,
            story_id,
            timestamp: qualgate_types::now(),
            verdict: QaVerdict::Blocked,
            tests_executed: false,
            test_results: None,
            coverage: None,
            coverage_meets_threshold: None,
            test_quality: None,
            acs_verified: Vec::new(),
            architecture_compliant: true,
            issues: Vec::new(),
            lessons_to_record: Vec::new(),
        })
    }

    fn touch(&mut self) {
        self.timestamp = qualgate_types::now();
    }

    // ── Mutation ────────────────────────────────────────────────────

    /// Insert or replace the verification for `ac.ac_id`.
    pub fn add_ac_verification(&mut self, ac: AcVerification) -> QaResult<()> {
        if ac.ac_id.trim().is_empty() {
            return Err(QaError::EmptyAcId);
        }
        debug!(story_id = %self.story_id, ac_id = %ac.ac_id, status = %ac.status, "AC verified");
        match self.acs_verified.iter_mut().find(|a| a.ac_id == ac.ac_id) {
            Some(existing) => *existing = ac,
            None => self.acs_verified.push(ac),
        }
        self.touch();
        Ok(())
    }

    /// Insert or replace the issue with the same id.
    pub fn add_issue(&mut self, issue: QaIssue) -> QaResult<()> {
        validate::non_empty("issue.id", &issue.id)?;
        match self.issues.iter_mut().find(|i| i.id == issue.id) {
            Some(existing) => *existing = issue,
            None => self.issues.push(issue),
        }
        self.touch();
        Ok(())
    }

    pub fn record_lesson(&mut self, lesson: Lesson) -> QaResult<()> {
        validate::non_empty("lesson", &lesson.lesson)?;
        self.lessons_to_record.push(lesson);
        self.touch();
        Ok(())
    }

    pub fn record_test_results(&mut self, results: TestResults) {
        self.test_results = Some(results);
        self.tests_executed = true;
        self.touch();
    }

    pub fn record_test_quality(&mut self, quality: TestQuality) {
        self.test_quality = Some(quality);
        self.touch();
    }

    /// Record line coverage (percent) and whether it meets `threshold`.
    pub fn record_coverage(&mut self, coverage: f64, threshold: f64) -> QaResult<()> {
        validate::in_range("coverage", coverage, 0.0, 100.0)?;
        validate::in_range("coverage_threshold", threshold, 0.0, 100.0)?;
        self.coverage = Some(coverage);
        self.coverage_meets_threshold = Some(coverage >= threshold);
        self.touch();
        Ok(())
    }

    pub fn set_architecture_compliant(&mut self, compliant: bool) {
        self.architecture_compliant = compliant;
        self.touch();
    }

    // ── Verdict ─────────────────────────────────────────────────────

    /// Derive the verdict from the AC results.
    ///
    /// Any blocked AC wins over any failed AC. No ACs at all is a pass.
    pub fn calculate_verdict(&self) -> QaVerdict {
        let statuses = || self.acs_verified.iter().map(|a| a.status);
        if statuses().any(|s| s == AcStatus::Blocked) {
            QaVerdict::Blocked
        } else if statuses().any(|s| s == AcStatus::Fail) {
            QaVerdict::Fail
        } else {
            QaVerdict::Pass
        }
    }

    /// Store [`calculate_verdict`](Self::calculate_verdict) on the record.
    pub fn apply_verdict(&mut self) -> QaVerdict {
        self.verdict = self.calculate_verdict();
        self.touch();
        info!(
            story_id = %self.story_id,
            verdict = %self.verdict,
            acs = self.acs_verified.len(),
            "QA verdict applied"
        );
        self.verdict
    }

    /// True only if the stored verdict is PASS, every AC passed, the
    /// architecture is compliant, and there are no critical or high issues.
    ///
    /// The AC check is repeated so a verdict assigned by hand cannot mask
    /// a failed criterion.
    pub fn qa_passed_successfully(&self) -> bool {
        self.verdict == QaVerdict::Pass
            && self.acs_verified.iter().all(AcVerification::is_pass)
            && self.architecture_compliant
            && !self.issues.iter().any(|i| i.severity.is_blocking())
    }

    pub fn issue_counts(&self) -> IssueCounts {
        IssueCounts::tally(&self.issues)
    }

    pub fn issues_with(&self, severity: IssueSeverity) -> impl Iterator<Item = &QaIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }

    pub fn passed_ac_count(&self) -> usize {
        self.acs_verified.iter().filter(|a| a.is_pass()).count()
    }

    /// One-line narrative, e.g. `QA FAIL: 1/2 ACs passed, 0 critical, 1 high issues`.
    pub fn generate_qa_summary(&self) -> String {
        let counts = self.issue_counts();
        format!(
            "QA {}: {}/{} ACs passed, {} critical, {} high issues",
            self.verdict,
            self.passed_ac_count(),
            self.acs_verified.len(),
            counts.critical,
            counts.high
        )
    }

    // ── Wire ────────────────────────────────────────────────────────

    pub fn validate(&self) -> QaResult<()> {
        validate::non_empty("story_id", &self.story_id)?;
        let mut seen = HashSet::new();
        for ac in &self.acs_verified {
            if ac.ac_id.trim().is_empty() {
                return Err(QaError::EmptyAcId);
            }
            if !seen.insert(ac.ac_id.as_str()) {
                return Err(QaError::DuplicateAc(ac.ac_id.clone()));
            }
        }
        let mut seen = HashSet::new();
        for issue in &self.issues {
            if !seen.insert(issue.id.as_str()) {
                return Err(QaError::DuplicateIssue(issue.id.clone()));
            }
        }
        if let Some(coverage) = self.coverage {
            validate::in_range("coverage", coverage, 0.0, 100.0)?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> QaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> QaResult<Self> {
        let qa: QaVerify = serde_json::from_str(json)?;
        qa.validate()?;
        Ok(qa)
    }
}
