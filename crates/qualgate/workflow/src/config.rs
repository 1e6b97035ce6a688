//! Engine configuration, loaded from TOML.
//!
//! ```toml
//! [gate]
//! readiness_threshold = 85
//! max_blockers = 0
//! max_unknowns = 5
//! allow_override = true
//! override_policy = "auto_approve"
//!
//! [qa]
//! coverage_threshold = 80.0
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use qualgate_commitment::{
    CommitmentGateConfig, GateRequirements, OverridePolicy, DEFAULT_MAX_BLOCKERS,
    DEFAULT_MAX_UNKNOWNS, DEFAULT_READINESS_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::{ConfigError, ConfigResult};
use crate::nodes::QaVerdictNode;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub gate: GateConfig,

    #[serde(default)]
    pub qa: QaConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load from `path`. A missing path or file yields the defaults.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.gate
            .requirements()
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("gate: {e}")))?;
        let threshold = self.qa.coverage_threshold;
        if !(0.0..=100.0).contains(&threshold) {
            return Err(ConfigError::Invalid(format!(
                "qa.coverage_threshold must be between 0 and 100, got {threshold}"
            )));
        }
        EnvFilter::try_new(&self.logging.level)
            .map_err(|e| ConfigError::Invalid(format!("logging.level: {e}")))?;
        Ok(())
    }

    /// Gate configuration without an override request bound.
    pub fn commitment_config(&self) -> CommitmentGateConfig {
        CommitmentGateConfig::default()
            .with_requirements(self.gate.requirements())
            .with_override_policy(self.gate.override_policy)
    }

    /// QA verdict node judging coverage against `[qa] coverage_threshold`.
    pub fn qa_verdict_node(&self) -> QaVerdictNode {
        QaVerdictNode::with_coverage_threshold(self.qa.coverage_threshold)
    }
}

/// `[gate]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    #[serde(default = "default_readiness_threshold")]
    pub readiness_threshold: u32,

    #[serde(default = "default_max_blockers")]
    pub max_blockers: u32,

    #[serde(default = "default_max_unknowns")]
    pub max_unknowns: u32,

    #[serde(default = "default_true")]
    pub allow_override: bool,

    #[serde(default)]
    pub override_policy: OverridePolicy,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            readiness_threshold: default_readiness_threshold(),
            max_blockers: default_max_blockers(),
            max_unknowns: default_max_unknowns(),
            allow_override: default_true(),
            override_policy: OverridePolicy::default(),
        }
    }
}

impl GateConfig {
    pub fn requirements(&self) -> GateRequirements {
        GateRequirements {
            readiness_threshold: self.readiness_threshold,
            max_blockers: self.max_blockers,
            max_unknowns: self.max_unknowns,
            allow_override: self.allow_override,
        }
    }
}

/// `[qa]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaConfig {
    /// Minimum line coverage, in percent.
    #[serde(default = "default_coverage_threshold")]
    pub coverage_threshold: f64,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            coverage_threshold: default_coverage_threshold(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_readiness_threshold() -> u32 {
    DEFAULT_READINESS_THRESHOLD
}

fn default_max_blockers() -> u32 {
    DEFAULT_MAX_BLOCKERS
}

fn default_max_unknowns() -> u32 {
    DEFAULT_MAX_UNKNOWNS
}

fn default_true() -> bool {
    true
}

fn default_coverage_threshold() -> f64 {
    80.0
}

fn default_log_level() -> String {
    "info".to_string()
}
