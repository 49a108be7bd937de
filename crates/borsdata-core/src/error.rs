use thiserror::Error;

use crate::http_client::HttpError;

/// Error classification used by callers and the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    Precondition,
    Transport,
    Api,
    Decode,
    Validation,
    Configuration,
}

/// Top-level error type for every client operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The caller violated a documented constraint; nothing was sent.
    #[error("precondition failed: {message}")]
    Precondition { message: String },

    /// No HTTP response was received (DNS, refused connection, timeout).
    #[error("transport error: {source}")]
    Transport { source: HttpError },

    /// The server answered with a non-2xx status.
    #[error("API request failed with status code {status}: {message}")]
    Api { status: u16, message: String },

    #[error("response body is not valid JSON: {source}")]
    Decode { source: serde_json::Error },

    /// The JSON decoded but did not match the expected entity shape.
    #[error("unexpected response shape for {context}: {source}")]
    Validation {
        context: &'static str,
        source: serde_json::Error,
    },

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl ClientError {
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    pub fn transport(source: HttpError) -> Self {
        Self::Transport { source }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn decode(source: serde_json::Error) -> Self {
        Self::Decode { source }
    }

    pub fn validation(context: &'static str, source: serde_json::Error) -> Self {
        Self::Validation { context, source }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ClientErrorKind {
        match self {
            Self::Precondition { .. } => ClientErrorKind::Precondition,
            Self::Transport { .. } => ClientErrorKind::Transport,
            Self::Api { .. } => ClientErrorKind::Api,
            Self::Decode { .. } => ClientErrorKind::Decode,
            Self::Validation { .. } => ClientErrorKind::Validation,
            Self::Configuration { .. } => ClientErrorKind::Configuration,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self.kind() {
            ClientErrorKind::Precondition => "client.precondition",
            ClientErrorKind::Transport => "client.transport",
            ClientErrorKind::Api => "client.api",
            ClientErrorKind::Decode => "client.decode",
            ClientErrorKind::Validation => "client.validation",
            ClientErrorKind::Configuration => "client.configuration",
        }
    }

    /// HTTP status for `Api` errors.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_carries_status_and_server_text() {
        let error = ClientError::api(401, "invalid authKey");

        assert_eq!(error.kind(), ClientErrorKind::Api);
        assert_eq!(error.status(), Some(401));
        assert_eq!(
            error.to_string(),
            "API request failed with status code 401: invalid authKey"
        );
    }

    #[test]
    fn codes_are_stable_per_kind() {
        assert_eq!(
            ClientError::precondition("too many ids").code(),
            "client.precondition"
        );
        assert_eq!(
            ClientError::transport(HttpError::timeout("deadline")).code(),
            "client.transport"
        );
        assert_eq!(ClientError::precondition("x").status(), None);
    }
}
