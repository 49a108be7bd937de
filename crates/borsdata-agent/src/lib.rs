//! # borsdata-agent
//!
//! Exposes every Borsdata client operation as a callable tool for AI agents.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | Tool names, descriptions and JSON input schemas |
//! | [`arguments`] | Typed argument structs per tool |
//! | [`adapter`] | Dispatch from tool call to client operation |
//! | [`envelope`] | The single result envelope per call |
//! | [`error`] | Why a tool call failed |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use borsdata_agent::ToolAdapter;
//! use serde_json::json;
//!
//! let adapter = ToolAdapter::from_env()?;
//! println!("{}", adapter.catalog().to_json());
//!
//! let result = adapter.call("get_markets", json!({})).await;
//! assert!(!result.is_error);
//! ```

pub mod adapter;
pub mod arguments;
pub mod catalog;
pub mod envelope;
pub mod error;

pub use adapter::ToolAdapter;
pub use catalog::{definition, ToolCatalog, ToolDefinition};
pub use envelope::ToolResult;
pub use error::ToolError;
