//! Tracing setup: subscriber initialization, span macros and event helpers.

pub mod events;
pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use anshin_core::config::ObservabilityConfig;

/// Environment variable holding a filter directive, e.g.
/// `ANSHIN_LOG=anshin_pipeline=debug,anshin_sources=info`.
pub const LOG_ENV: &str = "ANSHIN_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber. Idempotent.
///
/// `ANSHIN_LOG` wins over the configured level; JSON lines are emitted when
/// `config.json` is set.
pub fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    install(filter, config.json);
}

/// Install with an explicit filter string, ignoring the environment.
pub fn init_tracing_with_filter(filter: &str, json: bool) {
    install(EnvFilter::new(filter), json);
}

fn install(filter: EnvFilter, json: bool) {
    INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(filter);
        let result = if json {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_current_span(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        } else {
            registry
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .try_init()
        };
        if result.is_err() {
            // Another subscriber (e.g. a test harness) is already installed.
            tracing::debug!("global subscriber already set");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        let config = ObservabilityConfig::default();
        init_tracing(&config);
        init_tracing(&config);
        init_tracing_with_filter("debug", true);
        events::job_started("job-1", "天神", 7);
    }
}
