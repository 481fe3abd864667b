//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

use crate::config::{Environment, ServerConfig};

/// Error raised when the global subscriber cannot be installed.
pub type TracingInitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installs the global subscriber: plain text in development, JSON elsewhere.
///
/// `RUST_LOG` overrides `server.log_level`. Fails if a subscriber is already set.
pub fn init_tracing(server: &ServerConfig) -> Result<(), TracingInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if server.environment == Environment::Development {
        builder.try_init()
    } else {
        builder.json().with_target(false).try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_initialisation_reports_error() {
        let server = ServerConfig::default();
        // Whichever call runs first installs the subscriber.
        let _ = init_tracing(&server);

        let result = init_tracing(&server);
        assert!(result.is_err());
    }
}
