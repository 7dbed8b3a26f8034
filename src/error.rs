//! Error types for the gemini bridge

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Main error type for the bridge
///
/// Display strings double as the protocol-level error messages, so they
/// must stay stable.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Gemini command failed: {0}")]
    CommandFailed(String),

    #[error("Gemini command timed out")]
    CommandTimedOut,

    #[error("Error executing gemini: {0}")]
    Execution(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Get error code for MCP protocol
    pub fn code(&self) -> i64 {
        match self {
            BridgeError::MethodNotFound(_) => -32601,
            BridgeError::UnknownTool(_) => -32602,
            _ => -32603,
        }
    }
}
