use serde::{Deserialize, Serialize};

/// Health of the credential provider backing an auth handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderState {
    Ok,
    Warning,
    Failure,
    Disabled,
}

/// Status reported by an auth handler's credential provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertProviderStatus {
    pub state: ProviderState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CertProviderStatus {
    /// Status used when no registered handler reports a provider.
    pub fn disabled() -> Self {
        Self {
            state: ProviderState::Disabled,
            message: None,
        }
    }

    pub fn ok() -> Self {
        Self {
            state: ProviderState::Ok,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            state: ProviderState::Failure,
            message: Some(message.into()),
        }
    }
}
