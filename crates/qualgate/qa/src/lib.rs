//! # qualgate-qa
//!
//! QA verification of a story against its acceptance criteria (ACs).
//!
//! A [`QaVerify`] record collects per-AC results, issues, test results,
//! coverage and lessons learned. The verdict is derived from the AC results
//! with precedence `BLOCKED > FAIL > PASS`. Success additionally requires
//! architecture compliance and no critical or high issues.

#![deny(unsafe_code)]

pub mod error;
pub mod issue;
pub mod qa;
pub mod testing;
pub mod verification;

pub use error::{QaError, QaResult};
pub use issue::{IssueCounts, Lesson, LessonCategory, QaIssue};
pub use qa::QaVerify;
pub use testing::{QualityRating, TestCounts, TestQuality, TestResults};
pub use verification::{AcStatus, AcVerification, QaVerdict};
