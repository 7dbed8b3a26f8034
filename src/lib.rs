//! Gemini MCP bridge
//!
//! Exposes the `gemini` CLI as an MCP tool over line-delimited JSON-RPC
//! on stdin/stdout.

pub mod error;
pub mod gemini;
pub mod mcp;

pub use error::{BridgeError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
