use alloy::transports::TransportError;
use thiserror::Error;

/// Failures surfaced by the exchange client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("no endpoint configured for environment '{environment}'")]
    Configuration { environment: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("node endpoint {url} unreachable: {reason}")]
    UnreachableEndpoint { url: String, reason: String },

    #[error("invalid {field}: '{value}' is not an unsigned integer")]
    InvalidInput { field: String, value: String },

    #[error("'{method}' call failed: {reason}")]
    RemoteCall {
        method: String,
        reason: String,
        revert_data: Option<String>,
    },
}

impl ClientError {
    pub fn remote_call(method: &str, reason: impl ToString) -> Self {
        Self::RemoteCall {
            method: method.to_string(),
            reason: reason.to_string(),
            revert_data: None,
        }
    }

    /// Keeps the JSON-RPC error `data` field, which carries the revert payload.
    pub fn from_transport(method: &str, err: TransportError) -> Self {
        let revert_data = err
            .as_error_resp()
            .and_then(|payload| payload.data.as_ref())
            .map(|data| data.get().to_string());

        Self::RemoteCall {
            method: method.to_string(),
            reason: err.to_string(),
            revert_data,
        }
    }

    pub fn revert_data(&self) -> Option<&str> {
        match self {
            Self::RemoteCall { revert_data, .. } => revert_data.as_deref(),
            _ => None,
        }
    }
}
