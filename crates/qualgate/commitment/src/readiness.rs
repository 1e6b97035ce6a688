//! Readiness input contract.
//!
//! The readiness score and gap counts are produced upstream by the
//! readiness analysis. The gate only reads `score`,
//! `factors.mvp_blocking_count` and `factors.known_unknowns_count`.

use qualgate_types::{validate, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::CommitmentResult;
use crate::requirements::DEFAULT_READINESS_THRESHOLD;

/// Upstream confidence in a readiness assessment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    #[default]
    Medium,
    Low,
}

/// Factors that fed the readiness score.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessFactors {
    /// MVP-blocking gaps. Gated by `maxBlockers`.
    pub mvp_blocking_count: u32,
    #[serde(default)]
    pub mvp_important_count: u32,
    /// Known unknowns. Gated by `maxUnknowns`.
    pub known_unknowns_count: u32,
    #[serde(default)]
    pub has_strong_context: bool,
    #[serde(default)]
    pub has_baseline_alignment: bool,
    #[serde(default)]
    pub total_gaps_analyzed: u32,
    /// Fraction of acceptance criteria covered, 0.0–1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ac_coverage: Option<f64>,
}

/// Result of the upstream readiness analysis for one story.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResult {
    pub story_id: String,
    pub analyzed_at: Timestamp,
    /// Readiness score, 0–100.
    pub score: u32,
    #[serde(default)]
    pub ready: bool,
    #[serde(default = "default_threshold")]
    pub threshold: u32,
    pub factors: ReadinessFactors,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub confidence: Confidence,
}

fn default_threshold() -> u32 {
    DEFAULT_READINESS_THRESHOLD
}

impl ReadinessResult {
    /// Minimal readiness result carrying the three gated values.
    pub fn new(
        story_id: impl Into<String>,
        score: u32,
        blockers: u32,
        unknowns: u32,
    ) -> CommitmentResult<Self> {
        let result = Self {
            story_id: story_id.into(),
            analyzed_at: qualgate_types::now(),
            score,
            ready: score >= DEFAULT_READINESS_THRESHOLD,
            threshold: DEFAULT_READINESS_THRESHOLD,
            factors: ReadinessFactors {
                mvp_blocking_count: blockers,
                known_unknowns_count: unknowns,
                ..Default::default()
            },
            summary: String::new(),
            confidence: Confidence::default(),
        };
        result.validate()?;
        Ok(result)
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn validate(&self) -> CommitmentResult<()> {
        validate::non_empty("storyId", &self.story_id)?;
        validate::in_range("score", f64::from(self.score), 0.0, 100.0)?;
        validate::in_range("threshold", f64::from(self.threshold), 0.0, 100.0)?;
        if let Some(coverage) = self.factors.ac_coverage {
            validate::in_range("factors.acCoverage", coverage, 0.0, 1.0)?;
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> CommitmentResult<Self> {
        let result: ReadinessResult = serde_json::from_str(json)?;
        result.validate()?;
        Ok(result)
    }
}
