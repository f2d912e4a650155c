//! Config loading for the meshauth daemon.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info};

use crate::defaults::apply_all_defaults;
use crate::env::resolve_env_vars;
use crate::schema::MeshAuthConfig;
use crate::validation::validate;

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the meshauth config directory.
/// Priority: `MESHAUTH_CONFIG_DIR` env > `~/.meshauth/`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MESHAUTH_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".meshauth");
    }
    PathBuf::from(".meshauth")
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load, substitute, default, and validate the config from disk.
///
/// Returns the default config if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<MeshAuthConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(apply_all_defaults(MeshAuthConfig::default()));
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&raw)
        .with_context(|| format!("Failed to parse config at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Parse one config document (YAML, which also covers JSON), resolve env
/// references, apply defaults, and validate.
pub fn parse_config(raw: &str) -> Result<MeshAuthConfig> {
    let value: serde_json::Value =
        serde_yaml::from_str(raw).context("Failed to parse config YAML")?;

    let value = resolve_env_vars(&value)?;

    let config: MeshAuthConfig =
        serde_json::from_value(value).context("Config does not match the expected schema")?;

    let config = apply_all_defaults(config);
    validate(&config)?;
    Ok(config)
}
