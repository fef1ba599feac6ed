//! JSON-RPC envelope for the tool protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version announced by `initialize`.
pub const MCP_VERSION: &str = "2024-11-05";

/// Line was not valid JSON.
pub const PARSE_ERROR: i32 = -32700;
/// Unknown method or tool.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Method params had the wrong shape.
pub const INVALID_PARAMS: i32 = -32602;

/// Tool definition for `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpTool {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON schema of the arguments
    pub input_schema: Value,
}

/// One request line.
#[derive(Debug, Clone, Deserialize)]
pub struct McpRequest {
    /// Request id; absent for notifications
    #[serde(default)]
    pub id: Option<Value>,
    /// Method name
    pub method: String,
    /// Method params
    #[serde(default)]
    pub params: Value,
}

impl McpRequest {
    /// Notifications get no response.
    pub fn is_notification(&self) -> bool {
        self.id.is_none() && self.method.starts_with("notifications/")
    }
}

/// Params of `initialize`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Client protocol version
    #[serde(default)]
    pub protocol_version: Option<String>,
    /// Identity to use for this connection
    #[serde(default)]
    pub caller: Option<String>,
}

/// Params of `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    /// Tool name
    pub name: String,
    /// Tool arguments
    #[serde(default)]
    pub arguments: Value,
}

/// One response line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    /// Always "2.0"
    pub jsonrpc: String,
    /// Request id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Result data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl McpResponse {
    /// A successful response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// An error response.
    pub fn failure(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}
