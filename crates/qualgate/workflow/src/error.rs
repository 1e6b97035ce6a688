use qualgate_commitment::CommitmentError;
use qualgate_qa::QaError;
use qualgate_review::ReviewError;
use thiserror::Error;

/// Errors from running workflow nodes.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The strict commitment node requires a readiness result in state.
    #[error("Readiness result is required for commitment gate validation")]
    MissingReadinessResult,

    #[error("commitment gate error: {0}")]
    Commitment(#[from] CommitmentError),

    #[error("review error: {0}")]
    Review(#[from] ReviewError),

    #[error("qa error: {0}")]
    Qa(#[from] QaError),

    #[error("node {node} failed: {source}")]
    Node {
        node: String,
        #[source]
        source: Box<WorkflowError>,
    },

    #[error("tracing initialisation failed: {0}")]
    Telemetry(String),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Errors from loading and validating engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
