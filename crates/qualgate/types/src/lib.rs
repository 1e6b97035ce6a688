//! # qualgate-types
//!
//! Shared vocabulary for the quality gate engine.
//!
//! The three gate components (review aggregation, commitment gate, QA
//! verification) are peers that never call each other, but they agree on a
//! handful of primitives:
//!
//! - [`SchemaVersion`]: the literal `schema: 1` tag carried by every
//!   top-level record. Unknown versions are rejected at parse time.
//! - [`IssueSeverity`]: the `critical | high | medium | low` remediation
//!   vocabulary used by ranked patches and QA issues.
//! - [`Timestamp`]: UTC instants, RFC 3339 on the wire.
//! - Field validation helpers returning [`TypesError`].

#![deny(unsafe_code)]

pub mod error;
pub mod schema;
pub mod severity;
pub mod validate;

pub use error::{TypesError, TypesResult};
pub use schema::{SchemaVersion, CURRENT_SCHEMA};
pub use severity::IssueSeverity;

/// UTC timestamp used by every record. Serialised as RFC 3339.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Current UTC time.
pub fn now() -> Timestamp {
    chrono::Utc::now()
}
