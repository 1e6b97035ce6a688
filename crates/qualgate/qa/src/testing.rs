//! Test execution results and test-quality assessment.

use serde::{Deserialize, Serialize};

/// Pass/fail counts for one test category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCounts {
    pub passed: u32,
    pub failed: u32,
}

impl TestCounts {
    pub fn new(passed: u32, failed: u32) -> Self {
        Self { passed, failed }
    }
}

/// Results per test category. Categories that were not run are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<TestCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration: Option<TestCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e2e: Option<TestCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<TestCounts>,
}

impl TestResults {
    pub fn with_unit(mut self, counts: TestCounts) -> Self {
        self.unit = Some(counts);
        self
    }

    pub fn with_integration(mut self, counts: TestCounts) -> Self {
        self.integration = Some(counts);
        self
    }

    pub fn with_e2e(mut self, counts: TestCounts) -> Self {
        self.e2e = Some(counts);
        self
    }

    pub fn with_http(mut self, counts: TestCounts) -> Self {
        self.http = Some(counts);
        self
    }

    fn categories(&self) -> impl Iterator<Item = &TestCounts> {
        [&self.unit, &self.integration, &self.e2e, &self.http]
            .into_iter()
            .flatten()
    }

    pub fn total_passed(&self) -> u32 {
        self.categories().map(|c| c.passed).sum()
    }

    pub fn total_failed(&self) -> u32 {
        self.categories().map(|c| c.failed).sum()
    }

    pub fn all_passed(&self) -> bool {
        self.total_failed() == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityRating {
    Strong,
    Adequate,
    Weak,
}

/// Reviewer's assessment of the tests themselves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestQuality {
    pub rating: QualityRating,
    #[serde(default)]
    pub concerns: Vec<String>,
}
