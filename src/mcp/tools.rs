//! Tool registry and dispatch for the gemini bridge

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::{BridgeError, Result};
use crate::gemini::{PromptRunner, RunError};

use super::protocol::{
    InitializeResult, McpHandler, McpRequest, McpResponse, Method, ToolCallResult, ToolDefinition,
};

/// Marker prepended to every query so gemini performs a live web search
/// instead of answering from static knowledge. Queries are never sent
/// without it.
pub const WEB_SEARCH_PREFIX: &str = "WebSearch: ";

/// All tool definitions exposed by the bridge
pub const TOOL_DEFINITIONS: &[(&str, &str, &str)] = &[(
    "gemini_search",
    "Search the web using Google Gemini AI for current information, news, weather, and real-time data",
    r#"{
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "The search query (e.g., 'current weather in Tokyo', 'latest news about AI', 'stock price of AAPL')"
            }
        },
        "required": ["query"]
    }"#,
)];

/// Get all tool definitions as ToolDefinition structs
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    TOOL_DEFINITIONS
        .iter()
        .map(|(name, description, schema)| ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::from_str(schema).unwrap_or(json!({})),
        })
        .collect()
}

/// Build the invocation prompt for a search query.
pub fn build_search_prompt(query: &str) -> String {
    format!("{}{}", WEB_SEARCH_PREFIX, query)
}

/// MCP request handler bridging tool calls to the gemini CLI
pub struct GeminiHandler {
    runner: Arc<dyn PromptRunner>,
}

impl GeminiHandler {
    pub fn new(runner: Arc<dyn PromptRunner>) -> Self {
        Self { runner }
    }

    /// Route a tool call by name; unknown names never reach the runner.
    fn handle_tool_call(&self, name: &str, arguments: &Value) -> Result<Value> {
        match name {
            "gemini_search" => self.tool_gemini_search(arguments),
            other => Err(BridgeError::UnknownTool(other.to_string())),
        }
    }

    fn tool_gemini_search(&self, arguments: &Value) -> Result<Value> {
        let query = arguments
            .get("query")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        let prompt = build_search_prompt(query);

        let output = self.runner.run(&prompt).map_err(|e| match e {
            RunError::TimedOut(_) => BridgeError::CommandTimedOut,
            other => BridgeError::Execution(other.to_string()),
        })?;

        if output.exit_code != 0 {
            return Err(BridgeError::CommandFailed(output.stderr));
        }

        let result = ToolCallResult::text(output.stdout.trim());
        Ok(serde_json::to_value(result)?)
    }
}

impl McpHandler for GeminiHandler {
    fn handle_request(&self, request: McpRequest) -> McpResponse {
        let result = match Method::from_name(&request.method) {
            Some(Method::Initialize) => Ok(json!(InitializeResult::default())),
            Some(Method::ListTools) => Ok(json!({ "tools": get_tool_definitions() })),
            Some(Method::CallTool) => {
                let name = request
                    .params
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                let arguments = request
                    .params
                    .get("arguments")
                    .cloned()
                    .unwrap_or_else(|| json!({}));

                self.handle_tool_call(name, &arguments)
            }
            None => Err(BridgeError::MethodNotFound(request.method.clone())),
        };

        match result {
            Ok(value) => McpResponse::success(request.id, value),
            Err(err) => McpResponse::from_error(request.id, err),
        }
    }
}
