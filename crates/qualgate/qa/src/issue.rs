//! QA issues and lessons learned.

use qualgate_types::IssueSeverity;
use serde::{Deserialize, Serialize};

/// A problem found during QA.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaIssue {
    pub id: String,
    pub severity: IssueSeverity,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ac_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
}

impl QaIssue {
    pub fn new(
        id: impl Into<String>,
        severity: IssueSeverity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            description: description.into(),
            ac_id: None,
            file: None,
            suggested_fix: None,
        }
    }

    pub fn for_ac(mut self, ac_id: impl Into<String>) -> Self {
        self.ac_id = Some(ac_id.into());
        self
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_suggested_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }
}

/// Issue tally by severity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCounts {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl IssueCounts {
    pub fn tally<'a>(issues: impl IntoIterator<Item = &'a QaIssue>) -> Self {
        let mut counts = Self::default();
        for issue in issues {
            match issue.severity {
                IssueSeverity::Critical => counts.critical += 1,
                IssueSeverity::High => counts.high += 1,
                IssueSeverity::Medium => counts.medium += 1,
                IssueSeverity::Low => counts.low += 1,
            }
        }
        counts
    }

    /// Critical plus high.
    pub fn blocking(&self) -> u32 {
        self.critical + self.high
    }

    pub fn total(&self) -> u32 {
        self.critical + self.high + self.medium + self.low
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonCategory {
    Blocker,
    Pattern,
    TimeSink,
    Reuse,
    AntiPattern,
}

/// Something worth remembering for future stories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub lesson: String,
    pub category: LessonCategory,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Lesson {
    pub fn new(lesson: impl Into<String>, category: LessonCategory) -> Self {
        Self {
            lesson: lesson.into(),
            category,
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}
