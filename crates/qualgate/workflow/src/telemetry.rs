//! Tracing subscriber setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{WorkflowError, WorkflowResult};

/// Install the global subscriber. `RUST_LOG` wins over `config.level`.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> WorkflowResult<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    let installed = if config.json {
        subscriber
            .with(fmt::layer().json().with_target(true))
            .try_init()
    } else {
        subscriber.with(fmt::layer().with_target(true)).try_init()
    };
    installed.map_err(|e| WorkflowError::Telemetry(e.to_string()))
}
