/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin, one per line
/// 2. Dispatches tool calls to the mood journal tools
/// 3. Writes JSON-RPC responses to stdout, one per line

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::domain::DomainError;
use crate::mcp::protocol::*;
use crate::storage::KeyValueBackend;
use crate::tools::{self, ToolOutput};
use crate::{MoodJournalServer, ServerError};

/// MCP server wrapping a mood journal
pub struct McpServer<B: KeyValueBackend> {
    journal: MoodJournalServer<B>,
    /// Whether the client has confirmed initialization
    initialized: bool,
}

impl<B: KeyValueBackend> McpServer<B> {
    pub fn new(journal: MoodJournalServer<B>) -> Self {
        Self {
            journal,
            initialized: false,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    ///
    /// Returns when stdin is closed.
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    pub(crate) async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let raw: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        // Valid JSON that is not a request object
        let id = raw.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(raw) {
            Ok(req) => req,
            Err(e) => {
                warn!("Malformed JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                    None,
                ));
            }
        };

        self.handle_request(request).await
    }

    async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                debug!("Client confirmed initialization");
                return None;
            }
            method if method.starts_with("notifications/") => {
                debug!("Ignoring notification {}", method);
                return None;
            }
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request),
            _ => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let params: InitializeParams = request
            .params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        match &params.client_info {
            Some(client) => info!("MCP client connected: {} {}", client.name, client.version),
            None => info!("MCP client connected"),
        }
        if let Some(version) = params.protocol_version.as_deref() {
            if version != MCP_VERSION {
                warn!("Client requested protocol {}, answering with {}", version, MCP_VERSION);
            }
        }

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Mood Journal MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_response(request.id, &result)
    }

    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tag_names: Vec<&str> = crate::domain::Tag::ALL.iter().map(|t| t.as_str()).collect();

        let tools = vec![
            ToolDefinition {
                name: "mood_log".to_string(),
                description: "Record a mood (1 = very sad ... 5 = very happy) for today or a specific date".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "mood": {"type": "integer", "minimum": 1, "maximum": 5, "description": "Mood rating 1-5"},
                        "date": {"type": "string", "description": "Date (YYYY-MM-DD, optional - defaults to today)"},
                        "tags": {"type": "array", "items": {"type": "string", "enum": tag_names}, "description": "Optional tags"},
                        "note": {"type": "string", "description": "Optional note, cut to 120 characters"}
                    },
                    "required": ["mood"]
                }),
            },
            ToolDefinition {
                name: "mood_day".to_string(),
                description: "Show the entries and average mood for one day".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "date": {"type": "string", "description": "Date (YYYY-MM-DD)"}
                    },
                    "required": ["date"]
                }),
            },
            ToolDefinition {
                name: "mood_list".to_string(),
                description: "List all entries, most recent first".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "limit": {"type": "integer", "minimum": 1, "description": "Maximum number of entries (optional)"}
                    },
                    "required": []
                }),
            },
            ToolDefinition {
                name: "mood_average".to_string(),
                description: "Average mood for a month".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "year": {"type": "integer", "description": "Year (optional - defaults to the current year)"},
                        "month": {"type": "integer", "minimum": 1, "maximum": 12, "description": "Month 1-12 (optional - defaults to the current month)"}
                    },
                    "required": []
                }),
            },
            ToolDefinition {
                name: "mood_calendar".to_string(),
                description: "Per-day average moods and colors for a calendar month".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "year": {"type": "integer", "description": "Year (optional - defaults to the current year)"},
                        "month": {"type": "integer", "minimum": 1, "maximum": 12, "description": "Month 1-12 (optional - defaults to the current month)"}
                    },
                    "required": []
                }),
            },
        ];

        JsonRpcResponse::success(request.id, json!({ "tools": tools }))
    }

    fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        if !self.initialized {
            debug!("tools/call before initialized notification");
        }

        let tool_params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let repo = self.journal.repository();
        let engine = self.journal.analytics();
        let args = tool_params.arguments;

        let result = match tool_params.name.as_str() {
            "mood_log" => call_tool(args, |p| tools::log_mood(repo, p)),
            "mood_day" => call_tool(args, |p| tools::get_day(repo, engine, p)),
            "mood_list" => call_tool(args, |p| tools::list_entries(repo, p)),
            "mood_average" => call_tool(args, |p| tools::get_monthly_average(repo, engine, p)),
            "mood_calendar" => call_tool(args, |p| tools::get_calendar(repo, engine, p)),
            _ => ToolCallResult::error(
                format!("Unknown tool: {}", tool_params.name),
                error_codes::METHOD_NOT_FOUND,
            ),
        };

        to_response(request.id, &result)
    }
}

/// Deserialize tool arguments, run the tool, and wrap its output
fn call_tool<P, R, F>(args: HashMap<String, Value>, tool: F) -> ToolCallResult
where
    P: DeserializeOwned,
    R: ToolOutput,
    F: FnOnce(P) -> Result<R, DomainError>,
{
    let params: P = match serde_json::from_value(Value::Object(args.into_iter().collect())) {
        Ok(p) => p,
        Err(e) => {
            return ToolCallResult::error(
                format!("Invalid arguments: {}", e),
                error_codes::INVALID_PARAMS,
            );
        }
    };

    match tool(params) {
        Ok(response) => {
            let structured = serde_json::to_value(&response).ok();
            ToolCallResult::success(response.message().to_string(), structured)
        }
        Err(e) => ToolCallResult::error(e.to_string(), domain_error_code(&e)),
    }
}

fn to_response<T: serde::Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize result: {}", e),
            None,
        ),
    }
}
