//! End-to-end test over the Unix socket transport.

use std::time::Duration;

use learnpath_core::Identifier;
use learnpath_progress::SharedLedger;
use learnpath_server::{LedgerServer, ServerConfig};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;

async fn connect(path: &std::path::Path) -> UnixStream {
    for _ in 0..100 {
        if let Ok(stream) = UnixStream::connect(path).await {
            return stream;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("server did not start listening on {}", path.display());
}

async fn roundtrip(stream: &mut BufReader<UnixStream>, request: Value) -> Value {
    let mut line = request.to_string();
    line.push('\n');
    stream.get_mut().write_all(line.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_line(&mut response).await.unwrap();
    serde_json::from_str(&response).unwrap()
}

fn tool_call(id: u64, name: &str, arguments: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "method": "tools/call",
           "params": {"name": name, "arguments": arguments}})
}

#[tokio::test]
async fn test_two_connections_with_their_own_callers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("learnpath.sock");

    let server = LedgerServer::new(ServerConfig::default(), SharedLedger::default());
    let ledger = server.ledger().clone();
    let task = tokio::spawn({
        let path = path.clone();
        async move { server.start_with_socket(&path).await }
    });

    let mut alice = BufReader::new(connect(&path).await);
    let mut bob = BufReader::new(connect(&path).await);

    roundtrip(&mut alice, json!({"id": 0, "method": "initialize", "params": {"caller": "alice"}})).await;
    roundtrip(&mut bob, json!({"id": 0, "method": "initialize", "params": {"caller": "bob"}})).await;

    for stream in [&mut alice, &mut bob] {
        let registered = roundtrip(stream, tool_call(1, "register", json!({}))).await;
        assert_eq!(registered["result"]["success"], true);
        let enrolled = roundtrip(stream, tool_call(2, "enroll", json!({"courseId": 1}))).await;
        assert_eq!(enrolled["result"]["success"], true);
    }

    let update = roundtrip(
        &mut alice,
        tool_call(3, "update_course_progress", json!({"courseId": 1, "lessonsCompleted": 10, "quizzesPassed": 2})),
    )
    .await;
    assert_eq!(update["id"], 3);
    assert_eq!(update["result"]["newPoints"], 240);

    let bob_points = roundtrip(&mut bob, tool_call(4, "get_points", json!({}))).await;
    assert_eq!(bob_points["result"], 0);

    let seen = ledger.read(|s| s.get_points(&Identifier::new("alice"))).await;
    assert_eq!(seen, 240);
    assert!(ledger.read(|s| s.audit()).await.is_ok());

    task.abort();
}
