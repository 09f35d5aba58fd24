use tracing_subscriber::EnvFilter;

use crate::config::TranquilConfig;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured filter.
pub fn init_tracing(config: &TranquilConfig) -> eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| eyre::eyre!("failed to install tracing subscriber: {e}"))
}
