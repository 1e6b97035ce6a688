//! Built-in workflow nodes.

pub mod commitment;
pub mod qa;
pub mod review;

pub use commitment::{CommitmentGateNode, MissingReadiness};
pub use qa::QaVerdictNode;
pub use review::ReviewFinalizeNode;
