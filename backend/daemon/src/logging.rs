//! Tracing subscriber setup for the daemon.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use meshauth_config::LoggingSection;

/// Initialize the global subscriber from the logging config.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(logging: Option<&LoggingSection>) {
    let level = logging
        .and_then(|l| l.level.as_deref())
        .unwrap_or(meshauth_config::defaults::DEFAULT_LOG_LEVEL);
    let json = logging.and_then(|l| l.json).unwrap_or(false);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_ansi(false))
            .try_init();
    } else {
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false))
            .try_init();
    }
}
