use thiserror::Error;

use crate::identity::NodeId;
use crate::types::AuthType;

/// Failure of one auth map operation.
///
/// The backing table is a shared kernel resource, so every operation can
/// fail independently; callers never assume atomicity across calls.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read auth map entry: {0}")]
    Read(String),

    #[error("failed to write auth map entry: {0}")]
    Write(String),

    #[error("failed to delete auth map entry: {0}")]
    Delete(String),

    #[error("failed to enumerate auth map entries: {0}")]
    Enumerate(String),
}

/// Top-level error type for the authentication control plane.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("multiple handlers for auth type: {0}")]
    DuplicateHandler(AuthType),

    #[error("unknown requested auth type: {0}")]
    UnknownAuthType(AuthType),

    #[error("remote node IP not available for node id {0}")]
    NodeIpUnavailable(NodeId),

    #[error("failed to authenticate with auth type {auth_type}: {message}")]
    Handler { auth_type: AuthType, message: String },

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
