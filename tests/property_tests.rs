//! Property-based tests for the gemini bridge
//!
//! These tests verify invariants that must hold for all inputs:
//! - The transport loop never panics and never drops a parseable request
//! - Unparseable lines never produce output
//! - Every query reaches the runner with the search marker prefixed
//!
//! Run with: cargo test --test property_tests

use proptest::prelude::*;
use serde_json::{json, Value};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use gemini_mcp::gemini::{PromptRunner, RunError, RunOutput};
use gemini_mcp::mcp::{GeminiHandler, McpHandler, McpRequest, McpServer};

struct StaticRunner;

impl PromptRunner for StaticRunner {
    fn run(&self, _prompt: &str) -> Result<RunOutput, RunError> {
        Ok(RunOutput {
            exit_code: 0,
            stdout: "ok".to_string(),
            stderr: String::new(),
        })
    }
}

#[derive(Default)]
struct RecordingRunner {
    prompts: Mutex<Vec<String>>,
}

impl PromptRunner for RecordingRunner {
    fn run(&self, prompt: &str) -> Result<RunOutput, RunError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(RunOutput {
            exit_code: 0,
            stdout: "ok".to_string(),
            stderr: String::new(),
        })
    }
}

fn serve(input: &str) -> Vec<Value> {
    let server = McpServer::new(GeminiHandler::new(Arc::new(StaticRunner)));
    let mut out = Vec::new();
    server
        .serve(Cursor::new(input.as_bytes().to_vec()), &mut out)
        .expect("serve failed");
    String::from_utf8(out)
        .expect("protocol output must be UTF-8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("output line must be JSON"))
        .collect()
}

fn id_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        "[a-z0-9-]{1,12}".prop_map(Value::from),
        Just(Value::Null),
    ]
}

mod transport {
    use super::*;

    proptest! {
        /// Invariant: the loop never panics, and emits exactly one line per
        /// line that parses as a request envelope - nothing for the rest.
        #[test]
        fn one_response_per_parseable_line(lines in prop::collection::vec("[ -~]{0,40}", 0..12)) {
            let input: String = lines.iter().map(|l| format!("{}\n", l)).collect();

            let parseable = lines
                .iter()
                .filter(|l| {
                    let trimmed = l.trim();
                    !trimmed.is_empty() && serde_json::from_str::<McpRequest>(trimmed).is_ok()
                })
                .count();

            let responses = serve(&input);
            prop_assert_eq!(responses.len(), parseable);
        }

        /// Invariant: a well-formed request always gets exactly one reply
        /// carrying the same id, whatever the method.
        #[test]
        fn ids_are_echoed(method in "[a-z/]{0,12}", id in id_strategy()) {
            let line = serde_json::to_string(&json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": method,
                "params": {}
            })).unwrap();

            let responses = serve(&format!("{}\n", line));
            prop_assert_eq!(responses.len(), 1);
            prop_assert_eq!(&responses[0]["jsonrpc"], &json!("2.0"));
            prop_assert_eq!(&responses[0]["id"], &id);
        }

        /// Invariant: methods outside the dispatch table are answered with
        /// -32601 naming the method; supported ones succeed.
        #[test]
        fn unsupported_methods_get_method_not_found(method in "[a-z/]{0,12}") {
            let line = serde_json::to_string(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": method,
                "params": {}
            })).unwrap();

            let responses = serve(&format!("{}\n", line));
            prop_assert_eq!(responses.len(), 1);

            match method.as_str() {
                "initialize" | "tools/list" => {
                    prop_assert!(responses[0].get("result").is_some());
                }
                "tools/call" => {
                    // No tool name in params, so this is an unknown-tool error
                    prop_assert_eq!(&responses[0]["error"]["code"], &json!(-32602));
                }
                other => {
                    prop_assert_eq!(&responses[0]["error"]["code"], &json!(-32601));
                    prop_assert_eq!(
                        &responses[0]["error"]["message"],
                        &json!(format!("Method not found: {}", other))
                    );
                }
            }
        }
    }
}

mod dispatch {
    use super::*;

    proptest! {
        /// Invariant: whatever the query text, the runner sees it exactly
        /// once, prefixed with the web-search marker.
        #[test]
        fn queries_always_carry_the_search_marker(query in "\\PC{0,60}") {
            let runner = Arc::new(RecordingRunner::default());
            let handler = GeminiHandler::new(runner.clone());

            let request: McpRequest = serde_json::from_value(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "tools/call",
                "params": {"name": "gemini_search", "arguments": {"query": query}}
            })).unwrap();

            let response = handler.handle_request(request);
            prop_assert!(response.error.is_none());

            let prompts = runner.prompts.lock().unwrap().clone();
            prop_assert_eq!(prompts.len(), 1);
            prop_assert_eq!(&prompts[0], &format!("WebSearch: {}", query));
        }
    }
}
