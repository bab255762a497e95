//! Drives the server over an in-memory JSON-RPC pipe.

use std::time::Duration;

use marklint_lsp::Backend;
use serde_json::Value;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, DuplexStream,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tower_lsp::LspService;
use tower_lsp::lsp_types::Url;

/// Writes one `Content-Length` framed JSON-RPC message.
async fn write_frame(writer: &mut DuplexStream, msg: &Value) {
    let body = msg.to_string();
    let frame = format!("Content-Length: {}\r\n\r\n{}", body.len(), body);
    writer.write_all(frame.as_bytes()).await.unwrap();
    writer.flush().await.unwrap();
}

/// Reads one framed message, or `None` once the stream ends.
async fn read_frame<R: AsyncBufRead + Unpin>(reader: &mut R) -> Option<Value> {
    let mut length = None;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).await.ok()? == 0 {
            return None;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                length = value.trim().parse::<usize>().ok();
            }
        }
    }

    let mut body = vec![0u8; length?];
    reader.read_exact(&mut body).await.ok()?;
    Some(serde_json::from_slice(&body).unwrap())
}

struct TestClient {
    writer: DuplexStream,
    rx: UnboundedReceiver<Value>,
}

impl TestClient {
    async fn start(root: &std::path::Path) -> Self {
        let (client_read, server_write) = tokio::io::duplex(64 * 1024);
        let (server_read, client_write) = tokio::io::duplex(64 * 1024);

        let (service, socket) = LspService::new(Backend::new);
        tokio::spawn(async move {
            tower_lsp::Server::new(server_read, server_write, socket)
                .serve(service)
                .await;
        });

        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut reader = BufReader::new(client_read);
            while let Some(msg) = read_frame(&mut reader).await {
                if tx.send(msg).is_err() {
                    break;
                }
            }
        });

        let mut client = Self {
            writer: client_write,
            rx,
        };

        let root_uri = Url::from_file_path(root).unwrap();
        client
            .send(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": { "rootUri": root_uri, "capabilities": {} }
            }))
            .await;
        client.wait_for(|m| m["id"] == 1).await;
        client
            .send(serde_json::json!({
                "jsonrpc": "2.0",
                "method": "initialized",
                "params": {}
            }))
            .await;

        client
    }

    async fn send(&mut self, msg: Value) {
        write_frame(&mut self.writer, &msg).await;
    }

    async fn wait_for(&mut self, pred: impl Fn(&Value) -> bool) -> Value {
        let deadline = tokio::time::sleep(Duration::from_secs(5));
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                msg = self.rx.recv() => {
                    let msg = msg.expect("server closed the connection");
                    if pred(&msg) {
                        return msg;
                    }
                }
                _ = &mut deadline => panic!("timed out waiting for message"),
            }
        }
    }

    /// Returns the next message that matches `pred`, if one arrives in time.
    async fn next_within(
        &mut self,
        dur: Duration,
        pred: impl Fn(&Value) -> bool,
    ) -> Option<Value> {
        tokio::time::timeout(dur, async {
            while let Some(msg) = self.rx.recv().await {
                if pred(&msg) {
                    return Some(msg);
                }
            }
            None
        })
        .await
        .ok()
        .flatten()
    }

    async fn change(&mut self, uri: &Url, version: i32, text: &str) {
        self.send(serde_json::json!({
            "jsonrpc": "2.0",
            "method": "textDocument/didChange",
            "params": {
                "textDocument": { "uri": uri, "version": version },
                "contentChanges": [{ "text": text }]
            }
        }))
        .await;
    }

    async fn wait_for_diagnostics(&mut self) -> Value {
        self.wait_for(|m| m["method"] == "textDocument/publishDiagnostics")
            .await
    }

    async fn open(&mut self, uri: &Url, text: &str) {
        self.send(serde_json::json!({
            "jsonrpc": "2.0",
            "method": "textDocument/didOpen",
            "params": {
                "textDocument": {
                    "uri": uri,
                    "languageId": "markdown",
                    "version": 1,
                    "text": text
                }
            }
        }))
        .await;
    }
}

#[tokio::test]
async fn test_did_open_publishes_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let mut client = TestClient::start(dir.path()).await;
    let uri = Url::from_file_path(dir.path().join("doc.md")).unwrap();

    client.open(&uri, "é ##x\n##Title").await;
    let msg = client.wait_for_diagnostics().await;

    let diagnostics = msg["params"]["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["code"], "heading-space");
    assert_eq!(diagnostics[0]["source"], "marklint");
    assert_eq!(diagnostics[0]["range"]["start"]["line"], 1);
    assert_eq!(diagnostics[0]["range"]["end"]["character"], 3);
    assert_eq!(msg["params"]["version"], 1);
}

#[tokio::test]
async fn test_rapid_changes_publish_once() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".marklint.json"), r#"{"debounce_ms": 200}"#).unwrap();
    let mut client = TestClient::start(dir.path()).await;
    let uri = Url::from_file_path(dir.path().join("doc.md")).unwrap();

    for version in 1..=5 {
        client
            .change(&uri, version, &format!("#Change {}", version))
            .await;
    }

    let msg = client.wait_for_diagnostics().await;
    assert_eq!(msg["params"]["version"], 5);
    let diagnostics = msg["params"]["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["code"], "heading-space");
    assert_eq!(diagnostics[0]["range"]["start"]["line"], 0);

    let late = client
        .next_within(Duration::from_millis(600), |m| {
            m["method"] == "textDocument/publishDiagnostics"
        })
        .await;
    assert!(late.is_none(), "stale versions were validated: {:?}", late);
}

#[tokio::test]
async fn test_code_actions() {
    let dir = tempfile::tempdir().unwrap();
    let mut client = TestClient::start(dir.path()).await;
    let uri = Url::from_file_path(dir.path().join("doc.md")).unwrap();

    client.open(&uri, "##Title").await;
    client.wait_for_diagnostics().await;

    client
        .send(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "textDocument/codeAction",
            "params": {
                "textDocument": { "uri": uri },
                "range": {
                    "start": { "line": 0, "character": 0 },
                    "end": { "line": 0, "character": 0 }
                },
                "context": { "diagnostics": [] }
            }
        }))
        .await;
    let response = client.wait_for(|m| m["id"] == 2).await;

    let actions = response["result"].as_array().unwrap();
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0]["title"], "Add space");
    assert_eq!(actions[0]["kind"], "quickfix");
    assert_eq!(actions[1]["kind"], "source.fixAll");

    let edits = &actions[1]["edit"]["changes"][uri.as_str()];
    assert_eq!(edits[0]["newText"], "## Title");
}

#[tokio::test]
async fn test_did_close_clears_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let mut client = TestClient::start(dir.path()).await;
    let uri = Url::from_file_path(dir.path().join("doc.md")).unwrap();

    client.open(&uri, "```").await;
    let first = client.wait_for_diagnostics().await;
    assert_eq!(first["params"]["diagnostics"][0]["code"], "fenced-code-closing");

    client
        .send(serde_json::json!({
            "jsonrpc": "2.0",
            "method": "textDocument/didClose",
            "params": { "textDocument": { "uri": uri } }
        }))
        .await;
    let cleared = client.wait_for_diagnostics().await;
    assert!(cleared["params"]["diagnostics"].as_array().unwrap().is_empty());
}
