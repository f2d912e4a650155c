use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use meshauth_core::{AuthType, CertificateRotationEvent, Component};
use meshauth_signal::SignalAuthKey;

use crate::manager::AuthManager;

/// Consumes raw signal records from the datapath event channel.
///
/// Each record is decoded and handed to the manager, which spawns an
/// independent task per key; the loop itself never blocks on a full
/// authentication cycle.
pub struct SignalMonitor {
    manager: Arc<AuthManager>,
}

impl SignalMonitor {
    pub fn new(manager: Arc<AuthManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl Component for SignalMonitor {
    type Item = Vec<u8>;

    fn name(&self) -> &str {
        "signal-monitor"
    }

    async fn run(&self, mut rx: mpsc::Receiver<Self::Item>) -> Result<()> {
        info!("Signal monitor started");

        while let Some(record) = rx.recv().await {
            match SignalAuthKey::decode(&record) {
                Ok(signal) => self.manager.handle_auth_request(signal),
                Err(err) => {
                    // A corrupt record must not end the intake loop.
                    warn!(
                        error = %err,
                        len = record.len(),
                        "Dropping malformed auth signal record"
                    );
                }
            }
        }

        info!("Signal channel closed, shutting down signal monitor");
        Ok(())
    }
}

/// Consumes certificate-rotation events from one handler's subscription.
///
/// One instance runs per registered handler, feeding the same dispatch
/// entry point the signal intake uses.
pub struct RotationMonitor {
    manager: Arc<AuthManager>,
    name: String,
}

impl RotationMonitor {
    pub fn new(manager: Arc<AuthManager>, auth_type: AuthType) -> Self {
        Self {
            manager,
            name: format!("rotation-monitor-{auth_type}"),
        }
    }
}

#[async_trait]
impl Component for RotationMonitor {
    type Item = CertificateRotationEvent;

    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, mut rx: mpsc::Receiver<Self::Item>) -> Result<()> {
        info!(monitor = %self.name, "Rotation monitor started");

        while let Some(event) = rx.recv().await {
            if let Err(err) = self.manager.handle_cert_rotation_event(&event) {
                warn!(
                    identity = %event.identity,
                    error = %err,
                    "Certificate rotation sweep failed"
                );
            }
        }

        info!(monitor = %self.name, "Rotation channel closed, shutting down");
        Ok(())
    }
}

/// Spawn a component onto the runtime, logging any terminal error.
pub fn spawn_component<C: Component>(component: C, rx: mpsc::Receiver<C::Item>) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(err) = component.run(rx).await {
            error!(component = component.name(), error = %err, "Component terminated with error");
        }
    })
}
