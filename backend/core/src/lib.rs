pub mod error;
pub mod identity;
pub mod status;
pub mod traits;
pub mod types;

pub use error::{AuthError, MapError};
pub use identity::{Identity, NodeId, RESERVED_IDENTITY_BOUND};
pub use status::{CertProviderStatus, ProviderState};
pub use traits::{AuthHandler, Component, NodeIpResolver};
pub use types::{
    AuthInfo, AuthKey, AuthRequest, AuthResponse, AuthType, CertificateRotationEvent,
};
