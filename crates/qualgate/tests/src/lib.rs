//! Cross-crate property and end-to-end tests for the quality gates.
//!
//! All tests live under `tests/`: `property/` holds proptest suites and
//! `e2e/` holds full gate scenarios.
