//! # qualgate-workflow
//!
//! Glue between the quality gates and a story workflow.
//!
//! Each gate is wrapped in a [`WorkflowNode`] that reads a shared
//! [`WorkflowState`] and returns a [`StateUpdate`]:
//!
//! - [`CommitmentGateNode`] validates readiness before implementation starts.
//! - [`ReviewFinalizeNode`] closes a review iteration.
//! - [`QaVerdictNode`] records the QA verdict.
//!
//! [`EngineConfig`] loads gate thresholds, the QA coverage threshold and
//! logging settings from TOML; [`init_tracing`] installs the subscriber.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod node;
pub mod nodes;
pub mod state;
pub mod telemetry;

pub use config::{EngineConfig, GateConfig, LoggingConfig, QaConfig};
pub use error::{ConfigError, ConfigResult, WorkflowError, WorkflowResult};
pub use node::{run_nodes, WorkflowNode};
pub use nodes::{CommitmentGateNode, MissingReadiness, QaVerdictNode, ReviewFinalizeNode};
pub use state::{StateUpdate, WorkflowState};
pub use telemetry::init_tracing;
