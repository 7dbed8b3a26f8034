//! Gemini MCP bridge server
//!
//! Run with: gemini-mcp-server

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gemini_mcp::gemini::GeminiCli;
use gemini_mcp::mcp::{GeminiHandler, McpServer};

#[derive(Parser, Debug)]
#[command(name = "gemini-mcp-server")]
#[command(about = "MCP stdio bridge exposing gemini web search as a tool")]
struct Args {
    /// Gemini executable to invoke
    #[arg(long, env = "GEMINI_MCP_COMMAND", default_value = "gemini")]
    gemini_command: String,

    /// Tool execution timeout in seconds
    #[arg(long, env = "GEMINI_MCP_TIMEOUT_SECS", default_value = "60")]
    timeout_secs: u64,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging to stderr (stdout is for MCP protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let runner = GeminiCli::new(
        args.gemini_command,
        Duration::from_secs(args.timeout_secs),
    )
    .context("failed to initialize gemini runner")?;

    let handler = GeminiHandler::new(Arc::new(runner));
    let server = McpServer::new(handler);

    tracing::info!("Gemini MCP server starting...");
    server.run()?;

    Ok(())
}
