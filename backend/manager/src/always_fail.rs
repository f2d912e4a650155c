use async_trait::async_trait;
use tokio::sync::mpsc;

use meshauth_core::{
    AuthError, AuthHandler, AuthRequest, AuthResponse, AuthType, CertProviderStatus,
    CertificateRotationEvent,
};

/// Fault-injection handler: rejects every authentication attempt.
///
/// Registered only when explicitly enabled in config, to exercise the
/// datapath's handling of denied authentication.
#[derive(Debug, Default)]
pub struct AlwaysFailHandler;

#[async_trait]
impl AuthHandler for AlwaysFailHandler {
    async fn authenticate(&self, request: &AuthRequest) -> Result<AuthResponse, AuthError> {
        Err(AuthError::Handler {
            auth_type: self.auth_type(),
            message: format!(
                "authenticate failed by configuration for identities {} -> {}",
                request.local, request.remote
            ),
        })
    }

    fn auth_type(&self) -> AuthType {
        AuthType::AlwaysFail
    }

    fn subscribe_rotated_identities(&self) -> mpsc::Receiver<CertificateRotationEvent> {
        // No credential provider, so no rotation feed: the sender is
        // dropped here and the receiver reports closed immediately.
        let (_tx, rx) = mpsc::channel(1);
        rx
    }

    fn cert_provider_status(&self) -> Option<CertProviderStatus> {
        None
    }
}
