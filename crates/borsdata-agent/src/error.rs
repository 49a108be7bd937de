use borsdata_core::ClientError;
use thiserror::Error;

/// Why a tool call could not produce a result.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        source: serde_json::Error,
    },

    #[error("arguments for {tool} must be a JSON object, got {found}")]
    NotAnObject { tool: String, found: &'static str },

    /// The client operation itself failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("failed to serialize result: {0}")]
    Serialize(serde_json::Error),
}

impl ToolError {
    pub fn invalid_arguments(tool: &str, source: serde_json::Error) -> Self {
        Self::InvalidArguments {
            tool: tool.to_owned(),
            source,
        }
    }

    /// Stable machine-readable code, matching the client's codes where wrapped.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "tool.unknown",
            Self::InvalidArguments { .. } | Self::NotAnObject { .. } => "tool.arguments",
            Self::Client(error) => error.code(),
            Self::Serialize(_) => "tool.serialize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tool_message_names_the_tool() {
        let error = ToolError::UnknownTool(String::from("get_everything"));
        assert_eq!(error.to_string(), "Unknown tool: get_everything");
        assert_eq!(error.code(), "tool.unknown");
    }

    #[test]
    fn client_errors_keep_their_message_and_code() {
        let error = ToolError::from(ClientError::api(401, "Unauthorized"));
        assert_eq!(
            error.to_string(),
            "API request failed with status code 401: Unauthorized"
        );
        assert_eq!(error.code(), "client.api");
    }
}
