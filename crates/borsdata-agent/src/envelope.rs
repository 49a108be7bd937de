//! # Tool Result Envelope
//!
//! Every tool call yields exactly one [`ToolResult`]: the JSON text of the
//! operation's result, or an error object `{"error": .., "tool": ..}`.

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResult {
    pub text: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(payload: &Value) -> Self {
        Self {
            text: payload.to_string(),
            is_error: false,
        }
    }

    pub fn failure(tool: &str, message: impl Into<String>) -> Self {
        let body = json!({ "error": message.into(), "tool": tool });
        Self {
            text: body.to_string(),
            is_error: true,
        }
    }

    /// Parse the text back into JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.text)
    }

    /// Pretty-printed text, falling back to the raw text.
    pub fn pretty(&self) -> String {
        self.json()
            .ok()
            .and_then(|value| serde_json::to_string_pretty(&value).ok())
            .unwrap_or_else(|| self.text.clone())
    }
}
