//! # qualgate-review
//!
//! Review aggregation: combines the results of independent verification
//! workers (lint, type-check, security, build, …) for one iteration of a
//! change into a single verdict, running totals and a ranked remediation
//! list.
//!
//! ```text
//!   WorkerResult ──add_worker_result──┐
//!                                     ├──▶ Review ──finalize──▶ verdict
//!   prior WorkerResult ──carry_forward┘                         totals
//!                                                               ranked patches
//! ```
//!
//! The verdict is FAIL as soon as any recorded worker failed. Remediation
//! ranking only considers `error` findings of failing workers.

#![deny(unsafe_code)]

pub mod error;
pub mod finding;
pub mod patch;
pub mod review;

pub use error::{ReviewError, ReviewResult};
pub use finding::{Finding, FindingSeverity, ReviewVerdict, WorkerResult};
pub use patch::{escalate, generate_ranked_patches, RankedPatch};
pub use review::Review;
