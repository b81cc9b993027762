//! Errors returned by the request client.

use crate::handler::ScheduledRedirect;
use crate::http::{ResponseEnvelope, TransportError};

/// Why a call did not resolve with a usable response.
#[derive(Debug)]
pub enum RequestError {
    /// The request path is not a relative path under the base URL.
    InvalidPath { path: String, reason: &'static str },

    /// A response arrived but its status was not accepted. `redirect` holds
    /// the pending login redirect a 403 schedules.
    Status {
        envelope: ResponseEnvelope,
        redirect: Option<ScheduledRedirect>,
    },

    /// No response arrived while the host was online. The transport error is
    /// passed through unchanged.
    Transport(TransportError),

    /// No response arrived while the host was offline; only surfaced by the
    /// typed helpers, which have no value to return.
    Offline,

    /// The request body could not be serialized.
    Encode(serde_json::Error),

    /// The response body could not be deserialized.
    Decode(serde_json::Error),
}

impl RequestError {
    /// Status code of a rejected response.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { envelope, .. } => Some(envelope.status),
            _ => None,
        }
    }

    pub fn envelope(&self) -> Option<&ResponseEnvelope> {
        match self {
            RequestError::Status { envelope, .. } => Some(envelope),
            _ => None,
        }
    }

    /// Takes the pending login redirect out of the error, if any.
    pub fn take_redirect(&mut self) -> Option<ScheduledRedirect> {
        match self {
            RequestError::Status { redirect, .. } => redirect.take(),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestError::InvalidPath { path, reason } => {
                write!(f, "Invalid request path {:?}: {}", path, reason)
            }
            RequestError::Status { envelope, .. } => match envelope.message() {
                Some(message) => write!(f, "HTTP {}: {}", envelope.status, message),
                None => write!(f, "HTTP {}", envelope.status),
            },
            RequestError::Transport(e) => write!(f, "{}", e),
            RequestError::Offline => write!(f, "Network is offline"),
            RequestError::Encode(e) => write!(f, "Failed to serialize request body: {}", e),
            RequestError::Decode(e) => write!(f, "Failed to parse response body: {}", e),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Transport(e) => Some(e),
            RequestError::Encode(e) | RequestError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TransportError> for RequestError {
    fn from(error: TransportError) -> Self {
        RequestError::Transport(error)
    }
}
