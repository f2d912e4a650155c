//! meshauthd: wires the auth manager to its collaborators and runs the
//! intake loops until shutdown.

mod logging;
mod nodes;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::info;

use meshauth_authmap::InMemoryAuthMap;
use meshauth_core::AuthHandler;
use meshauth_manager::{
    spawn_component, AlwaysFailHandler, AuthManager, RotationMonitor, SignalMonitor,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = meshauth_config::config_file_path(&meshauth_config::config_dir());
    let config = meshauth_config::load_config(&config_path).await?;

    logging::init_logging(config.logging.as_ref());
    info!(config = %config_path.display(), "Starting meshauthd");

    let authmap = Arc::new(InMemoryAuthMap::new());
    let node_registry = Arc::new(nodes::NodeRegistry::new());
    for node in &config.nodes {
        node_registry.upsert(meshauth_core::NodeId(node.id), node.ip);
    }

    let mut handlers: Vec<Arc<dyn AuthHandler>> = Vec::new();
    if config.enable_always_fail() {
        handlers.push(Arc::new(AlwaysFailHandler));
    }

    let manager = AuthManager::new(
        handlers.clone(),
        authmap,
        node_registry,
        chrono::Duration::seconds(config.signal_backoff_secs() as i64),
    )
    .context("failed to build auth manager")?;

    // Datapath attach point: the kernel event reader pushes raw auth_key
    // records into this channel.
    let (signal_tx, signal_rx) = mpsc::channel(config.signal_queue_size());
    spawn_component(SignalMonitor::new(Arc::clone(&manager)), signal_rx);

    for handler in &handlers {
        let rotations = handler.subscribe_rotated_identities();
        spawn_component(
            RotationMonitor::new(Arc::clone(&manager), handler.auth_type()),
            rotations,
        );
    }

    info!(
        provider_status = ?manager.cert_provider_status().state,
        handlers = handlers.len(),
        "Auth manager running"
    );

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("Shutdown signal received, stopping meshauthd");

    drop(signal_tx);
    Ok(())
}
