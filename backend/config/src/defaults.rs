//! Config defaults: applies sensible default values to parsed config.

use crate::schema::{AuthSection, LoggingSection, MeshAuthConfig};

/// Default minimum interval between non-forced re-authentications of a
/// key.
pub const DEFAULT_SIGNAL_BACKOFF_SECS: u64 = 60;

/// Default datapath signal channel capacity.
pub const DEFAULT_SIGNAL_QUEUE_SIZE: usize = 1024;

/// Default rotation-event channel capacity.
pub const DEFAULT_ROTATION_QUEUE_SIZE: usize = 1024;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: MeshAuthConfig) -> MeshAuthConfig {
    let config = apply_auth_defaults(config);
    apply_logging_defaults(config)
}

/// Ensure every auth setting has an effective value.
fn apply_auth_defaults(mut config: MeshAuthConfig) -> MeshAuthConfig {
    let auth = config.auth.get_or_insert_with(AuthSection::default);

    if auth.signal_backoff_secs.is_none() {
        auth.signal_backoff_secs = Some(DEFAULT_SIGNAL_BACKOFF_SECS);
    }
    if auth.signal_queue_size.is_none() {
        auth.signal_queue_size = Some(DEFAULT_SIGNAL_QUEUE_SIZE);
    }
    if auth.rotation_queue_size.is_none() {
        auth.rotation_queue_size = Some(DEFAULT_ROTATION_QUEUE_SIZE);
    }
    if auth.enable_always_fail.is_none() {
        auth.enable_always_fail = Some(false);
    }

    config
}

/// Ensure the logging level is set.
fn apply_logging_defaults(mut config: MeshAuthConfig) -> MeshAuthConfig {
    let logging = config.logging.get_or_insert_with(LoggingSection::default);

    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    if logging.json.is_none() {
        logging.json = Some(false);
    }

    config
}
