//! Acceptance-criterion verification results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of verifying one acceptance criterion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AcStatus {
    Pass,
    Fail,
    /// Could not be verified, e.g. the environment was unavailable.
    Blocked,
}

impl fmt::Display for AcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
            Self::Blocked => write!(f, "BLOCKED"),
        }
    }
}

/// Overall QA verdict. Same vocabulary as [`AcStatus`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QaVerdict {
    Pass,
    Fail,
    #[default]
    Blocked,
}

impl fmt::Display for QaVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
            Self::Blocked => write!(f, "BLOCKED"),
        }
    }
}

/// Verification of one acceptance criterion. Keyed by `ac_id` within a
/// QA record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcVerification {
    pub ac_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ac_text: Option<String>,
    pub status: AcStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AcVerification {
    pub fn new(ac_id: impl Into<String>, status: AcStatus) -> Self {
        Self {
            ac_id: ac_id.into(),
            ac_text: None,
            status,
            evidence_ref: None,
            notes: None,
        }
    }

    pub fn pass(ac_id: impl Into<String>) -> Self {
        Self::new(ac_id, AcStatus::Pass)
    }

    pub fn fail(ac_id: impl Into<String>) -> Self {
        Self::new(ac_id, AcStatus::Fail)
    }

    pub fn blocked(ac_id: impl Into<String>) -> Self {
        Self::new(ac_id, AcStatus::Blocked)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.ac_text = Some(text.into());
        self
    }

    pub fn with_evidence(mut self, evidence_ref: impl Into<String>) -> Self {
        self.evidence_ref = Some(evidence_ref.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_pass(&self) -> bool {
        self.status == AcStatus::Pass
    }
}
