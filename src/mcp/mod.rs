//! MCP (Model Context Protocol) server implementation
//!
//! JSON-RPC over stdio for AI tool integration.

pub mod protocol;
pub mod tools;

pub use protocol::{
    InitializeResult, McpHandler, McpRequest, McpResponse, McpServer, Method, ToolCallResult,
    PROTOCOL_VERSION, SERVER_NAME,
};
pub use tools::{build_search_prompt, get_tool_definitions, GeminiHandler, TOOL_DEFINITIONS};
