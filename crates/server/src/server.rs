//! Tool server over stdio and Unix sockets.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use learnpath_core::Identifier;
use learnpath_progress::SharedLedger;

use crate::config::ServerConfig;
use crate::protocol::{
    InitializeParams, McpRequest, McpResponse, McpTool, ToolCallParams, INVALID_PARAMS,
    MCP_VERSION, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::tools::{builtin_tools, call_tool};

/// Per-connection state.
#[derive(Debug, Clone)]
pub struct Session {
    /// Identity every tool call on this connection acts as
    pub caller: Identifier,
}

/// LearnPath tool server.
///
/// Cloning is cheap; clones serve the same ledger.
#[derive(Clone)]
pub struct LedgerServer {
    config: ServerConfig,
    tools: Arc<Vec<McpTool>>,
    ledger: SharedLedger,
}

impl LedgerServer {
    /// Create a server over a ledger.
    pub fn new(config: ServerConfig, ledger: SharedLedger) -> Self {
        Self {
            config,
            tools: Arc::new(builtin_tools()),
            ledger,
        }
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Registered tools.
    pub fn tools(&self) -> &[McpTool] {
        &self.tools
    }

    /// The served ledger.
    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    /// A fresh session acting as the configured default caller.
    pub fn session(&self) -> Session {
        Session {
            caller: self.config.default_caller.clone(),
        }
    }

    /// Handle one request.
    pub async fn handle_request(&self, session: &mut Session, request: McpRequest) -> Option<McpResponse> {
        if request.is_notification() {
            debug!("Notification: {}", request.method);
            return None;
        }

        let id = request.id;
        let response = match request.method.as_str() {
            "initialize" => {
                let params: InitializeParams = if request.params.is_null() {
                    InitializeParams::default()
                } else {
                    match serde_json::from_value(request.params) {
                        Ok(p) => p,
                        Err(e) => {
                            return Some(McpResponse::failure(id, INVALID_PARAMS, e.to_string()))
                        }
                    }
                };
                if let Some(caller) = params.caller {
                    session.caller = Identifier::new(caller);
                }
                debug!("Initialize as {}", session.caller);
                McpResponse::success(
                    id,
                    json!({
                        "protocolVersion": params.protocol_version.as_deref().unwrap_or(MCP_VERSION),
                        "capabilities": { "tools": {} },
                        "serverInfo": {
                            "name": self.config.server_name,
                            "version": self.config.version
                        }
                    }),
                )
            }

            "tools/list" => McpResponse::success(id, json!({ "tools": self.tools.as_slice() })),

            "tools/call" => {
                let call: ToolCallParams = match serde_json::from_value(request.params) {
                    Ok(c) => c,
                    Err(e) => return Some(McpResponse::failure(id, INVALID_PARAMS, e.to_string())),
                };
                match call_tool(&self.ledger, &session.caller, &call.name, call.arguments).await {
                    Some(result) => McpResponse::success(id, result),
                    None => McpResponse::failure(id, METHOD_NOT_FOUND, format!("Unknown tool: {}", call.name)),
                }
            }

            "ping" => McpResponse::success(id, json!({ "status": "pong" })),

            other => McpResponse::failure(id, METHOD_NOT_FOUND, format!("Method not found: {}", other)),
        };

        Some(response)
    }

    /// Handle one input line, returning the serialized response if any.
    pub async fn handle_line(&self, session: &mut Session, line: &str) -> Option<String> {
        if line.trim().is_empty() {
            return None;
        }

        let response = match serde_json::from_str::<McpRequest>(line) {
            Ok(request) => self.handle_request(session, request).await?,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                McpResponse::failure(None, PARSE_ERROR, format!("Parse error: {}", e))
            }
        };

        Some(serde_json::to_string(&response).unwrap_or_else(|_| "{}".to_string()))
    }

    /// Serve one connection until its input closes.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut session = self.session();
        let mut lines = BufReader::new(reader).lines();

        while let Some(line) = lines.next_line().await? {
            let Some(response) = self.handle_line(&mut session, &line).await else {
                continue;
            };

            if let Err(e) = writer.write_all(response.as_bytes()).await {
                error!("Failed to write response: {}", e);
                break;
            }
            if let Err(e) = writer.write_all(b"\n").await {
                error!("Failed to write newline: {}", e);
                break;
            }
            if let Err(e) = writer.flush().await {
                error!("Failed to flush: {}", e);
                break;
            }
        }

        Ok(())
    }

    /// Serve stdin/stdout.
    pub async fn start_with_stdio(&self) -> anyhow::Result<()> {
        info!("Starting LearnPath server v{} (stdio transport)", self.config.version);
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await?;
        info!("Server stopped");
        Ok(())
    }

    /// Accept connections on a Unix socket until Ctrl-C.
    ///
    /// Each connection gets its own session and task.
    pub async fn start_with_socket(&self, socket_path: &Path) -> anyhow::Result<()> {
        info!(
            "Starting LearnPath server v{} (socket transport at {})",
            self.config.version,
            socket_path.display()
        );

        if socket_path.exists() {
            std::fs::remove_file(socket_path)?;
        }
        let listener = tokio::net::UnixListener::bind(socket_path)?;

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, _)) => {
                            let server = self.clone();
                            tokio::spawn(async move {
                                let (reader, writer) = stream.into_split();
                                if let Err(e) = server.serve(reader, writer).await {
                                    error!("Connection failed: {}", e);
                                }
                            });
                        }
                        Err(e) => {
                            error!("Failed to accept connection: {}", e);
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    break;
                }
            }
        }

        if let Err(e) = std::fs::remove_file(socket_path) {
            debug!("Could not remove socket file: {}", e);
        }
        info!("Server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn parse_response(line: &str) -> serde_json::Result<Value> {
        serde_json::from_str(line)
    }

    fn server() -> LedgerServer {
        LedgerServer::new(ServerConfig::default(), SharedLedger::default())
    }

    async fn send(server: &LedgerServer, session: &mut Session, request: Value) -> Value {
        let line = server
            .handle_line(session, &request.to_string())
            .await
            .expect("response");
        parse_response(&line).unwrap()
    }

    async fn call(server: &LedgerServer, session: &mut Session, name: &str, arguments: Value) -> Value {
        let response = send(
            server,
            session,
            json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call",
                   "params": {"name": name, "arguments": arguments}}),
        )
        .await;
        response["result"].clone()
    }

    #[tokio::test]
    async fn test_initialize_sets_caller() {
        let server = server();
        let mut session = server.session();

        let response = send(
            &server,
            &mut session,
            json!({"jsonrpc": "2.0", "id": 0, "method": "initialize",
                   "params": {"protocolVersion": MCP_VERSION, "capabilities": {}, "caller": "alice"}}),
        )
        .await;
        assert_eq!(response["result"]["serverInfo"]["name"], "learnpath");
        assert_eq!(session.caller.as_str(), "alice");

        let result = call(&server, &mut session, "register", json!({})).await;
        assert_eq!(result["success"], true);
        assert_eq!(result["identifier"], "alice");
    }

    #[tokio::test]
    async fn test_default_caller_without_initialize() {
        let server = server();
        let mut session = server.session();
        let result = call(&server, &mut session, "register", json!({})).await;
        assert_eq!(result["identifier"], "anonymous");
    }

    #[tokio::test]
    async fn test_tools_list() {
        let server = server();
        let mut session = server.session();
        let response = send(&server, &mut session, json!({"id": 2, "method": "tools/list"})).await;
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), server.tools().len());
        assert_eq!(tools[0]["name"], "register");
        assert!(tools[0].get("inputSchema").is_some());
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let server = server();
        let mut session = server.session();

        let line = server.handle_line(&mut session, "{not json").await.unwrap();
        assert_eq!(parse_response(&line).unwrap()["error"]["code"], PARSE_ERROR);

        let response = send(
            &server,
            &mut session,
            json!({"id": 3, "method": "tools/call", "params": {"name": "no_such_tool"}}),
        )
        .await;
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
        assert_eq!(response["id"], 3);

        let response = send(&server, &mut session, json!({"id": 4, "method": "resources/list"})).await;
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);

        let response = send(&server, &mut session, json!({"id": 5, "method": "tools/call", "params": 7})).await;
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_blank_lines_and_notifications_are_silent() {
        let server = server();
        let mut session = server.session();
        assert!(server.handle_line(&mut session, "   ").await.is_none());
        assert!(server
            .handle_line(&mut session, r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_progress_flow() {
        let server = server();
        let mut session = server.session();
        session.caller = Identifier::new("bob");

        call(&server, &mut session, "register", json!({})).await;
        let result = call(&server, &mut session, "enroll", json!({"courseId": 1})).await;
        assert_eq!(result["success"], true);

        let result = call(
            &server,
            &mut session,
            "update_course_progress",
            json!({"courseId": 1, "lessonsCompleted": 5, "quizzesPassed": 0}),
        )
        .await;
        assert_eq!(result["newPoints"], 100);
        assert_eq!(result["totalPoints"], 100);

        let progress = call(&server, &mut session, "list_my_progress", json!({})).await;
        assert_eq!(progress[0]["title"], "Math 101");
        assert_eq!(progress[0]["lessonsCompleted"], 5);

        let points = call(&server, &mut session, "get_points", json!({})).await;
        assert_eq!(points, 100);

        let other = call(&server, &mut session, "get_profile_by_identifier", json!({"identifier": "nobody"})).await;
        assert_eq!(other["totalPoints"], 0);
        assert_eq!(other["enrolledCourses"], json!([]));
    }

    #[tokio::test]
    async fn test_sessions_share_ledger() {
        let server = server();
        let mut a = server.session();
        a.caller = Identifier::new("a");
        let mut b = server.session();
        b.caller = Identifier::new("b");

        call(&server, &mut a, "register", json!({})).await;
        call(&server, &mut a, "enroll", json!({"courseId": 2})).await;
        call(
            &server,
            &mut a,
            "update_course_progress",
            json!({"courseId": 2, "lessonsCompleted": 3, "quizzesPassed": 1}),
        )
        .await;

        let seen = call(&server, &mut b, "get_profile_by_identifier", json!({"identifier": "a"})).await;
        assert_eq!(seen["totalPoints"], 80);
        assert_eq!(seen["enrolledCourses"], json!([2]));
    }

    #[tokio::test]
    async fn test_serve_over_duplex() {
        let server = server();
        let (client, server_end) = tokio::io::duplex(4096);
        let (reader, writer) = tokio::io::split(server_end);
        let task = tokio::spawn({
            let server = server.clone();
            async move { server.serve(reader, writer).await }
        });

        let (client_read, mut client_write) = tokio::io::split(client);
        client_write
            .write_all(b"{\"id\":1,\"method\":\"ping\"}\n\n{\"id\":2,\"method\":\"tools/call\",\"params\":{\"name\":\"list_courses\"}}\n")
            .await
            .unwrap();
        client_write.shutdown().await.unwrap();
        drop(client_write);

        let mut lines = BufReader::new(client_read).lines();
        let first = parse_response(&lines.next_line().await.unwrap().unwrap()).unwrap();
        assert_eq!(first["result"]["status"], "pong");
        let second = parse_response(&lines.next_line().await.unwrap().unwrap()).unwrap();
        assert_eq!(second["result"].as_array().map(Vec::len), Some(3));

        task.await.unwrap().unwrap();
    }
}
