use clipstack_config::{LogFormat, LoggingConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Overrides `[logging] filter` when set.
pub(crate) const LOG_ENV: &str = "CLIPSTACK_LOG";

/// Installs the global subscriber. Logs go to stderr so stdout only carries
/// command output.
pub(crate) fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(config.filter()))
        .unwrap_or_else(|_| EnvFilter::new(clipstack_config::DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format() {
        LogFormat::Json => registry
            .with(fmt::layer().json().flatten_event(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    if let Err(e) = result {
        eprintln!("warning: logging disabled: {e}");
    }
}
