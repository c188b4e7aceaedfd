/// MCP (Model Context Protocol) message structures and JSON-RPC handling
///
/// This module defines the JSON-RPC message format MCP clients use to
/// talk to the mood journal server.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::DomainError;

/// MCP protocol version we support
pub const MCP_VERSION: &str = "2024-11-05";

/// JSON-RPC 2.0 request message
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0"); tolerated when missing
    #[allow(dead_code)]
    #[serde(default)]
    pub jsonrpc: String,
    /// Absent for notifications
    #[serde(default)]
    pub id: Value,
    /// The method to call (e.g., "tools/call")
    pub method: String,
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 response message
///
/// Carries either a result or an error, never both.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error information
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// tools/call parameters
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call (e.g., "mood_log")
    pub name: String,
    #[serde(default)]
    pub arguments: HashMap<String, Value>,
}

/// tools/call result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
    pub is_error: bool,
    /// Machine-readable tool response alongside the text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
}

/// Content returned by a tool
#[derive(Debug, Serialize)]
pub struct ToolContent {
    /// Type of content (always "text" here)
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// MCP tool definition advertised by tools/list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON schema for the tool's arguments
    pub input_schema: Value,
}

/// MCP server capabilities
#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Tools capability information
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    /// The tool list never changes at runtime
    pub list_changed: bool,
}

/// MCP initialization request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitializeParams {
    pub protocol_version: Option<String>,
    pub client_info: Option<ClientInfo>,
}

/// Information about the connecting MCP client
#[derive(Debug, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    #[serde(default)]
    pub version: String,
}

/// MCP initialization response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

/// Information about the mood journal server
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

// JSON-RPC error codes
pub mod error_codes {
    /// Invalid JSON was received by the server
    pub const PARSE_ERROR: i32 = -32700;
    /// Valid JSON, but not a request object
    pub const INVALID_REQUEST: i32 = -32600;
    /// The requested method doesn't exist
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Method exists but parameters are wrong
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal JSON-RPC error
    pub const INTERNAL_ERROR: i32 = -32603;

    // Application-specific codes live in -32000 to -32099
    /// Tool arguments failed domain validation
    pub const VALIDATION_ERROR: i32 = -32003;
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Value, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data,
            }),
        }
    }
}

impl ToolCallResult {
    /// Create a successful tool result with text and structured content
    pub fn success(text: String, structured: Option<Value>) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text,
            }],
            is_error: false,
            structured_content: structured,
        }
    }

    /// Create an error tool result
    ///
    /// `data` carries the JSON-RPC style code so clients can tell
    /// validation failures from internal ones.
    pub fn error(error_message: String, code: i32) -> Self {
        Self {
            content: vec![ToolContent {
                content_type: "text".to_string(),
                text: format!("Error: {}", error_message),
            }],
            is_error: true,
            structured_content: Some(serde_json::json!({ "code": code })),
        }
    }
}

/// Map a domain error to the code reported with a failed tool call
pub fn domain_error_code(error: &DomainError) -> i32 {
    match error {
        DomainError::Validation { .. }
        | DomainError::InvalidMood(_)
        | DomainError::UnknownTag(_)
        | DomainError::InvalidDate(_)
        | DomainError::InvalidMonth(_) => error_codes::VALIDATION_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let response = JsonRpcResponse::error(
            serde_json::json!(7),
            error_codes::METHOD_NOT_FOUND,
            "nope".to_string(),
            None,
        );
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["id"], 7);
        assert_eq!(value["error"]["code"], -32601);
        assert!(value.get("result").is_none());
    }

    #[test]
    fn test_tool_result_uses_camel_case() {
        let value = serde_json::to_value(ToolCallResult::error("bad".to_string(), -32003)).unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], "Error: bad");
        assert_eq!(value["structuredContent"]["code"], -32003);
    }

    #[test]
    fn test_initialize_params_are_lenient() {
        let params: InitializeParams = serde_json::from_value(serde_json::json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test-client", "version": "1.0"}
        }))
        .unwrap();
        assert_eq!(params.client_info.unwrap().name, "test-client");

        let empty: InitializeParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(empty.protocol_version.is_none());
    }
}
