//! Tool-server client.
//!
//! Spawns the server process and owns the JSON-RPC plumbing: a background
//! reader task holds the stdout half exclusively and correlates responses
//! to pending requests by id through `oneshot` channels, while writes to
//! the child's stdin are serialized behind a mutex. Messages are
//! newline-delimited JSON frames.
//!
//! The child process is killed on [`Drop`], so the server's lifetime is
//! bounded by the client's on every exit path, including early returns and
//! fault paths.

use crate::mcp::error::{McpError, Result};
use crate::mcp::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcErrorOut,
    JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, ListToolsResult, ToolInfo,
};
use crate::mcp::transport::{MessageKind, classify_message};
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

/// Timeout for the `initialize` handshake.
const INITIALIZE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

type PendingMap = HashMap<u64, oneshot::Sender<JsonRpcResponse>>;

/// Client for a spawned stdio tool server.
pub struct McpClient {
    /// Background reader task handle.
    _reader_handle: JoinHandle<()>,

    /// Request-response correlation (request_id -> oneshot sender).
    pending_responses: Arc<Mutex<PendingMap>>,

    /// Writer to the child's stdin (serialized writes, independent of reader).
    ///
    /// Wrapped in `Arc` so the background reader loop can also send
    /// `method not found` responses for server-initiated requests this
    /// client does not serve.
    writer: Arc<Mutex<BufWriter<ChildStdin>>>,

    /// Tool server child process (killed on Drop to prevent orphans).
    child: Child,
}

impl McpClient {
    /// Spawn the tool server and wire up the transport.
    ///
    /// `envs` are passed to the child (e.g. credentials the server needs).
    /// The handshake is NOT performed here; call
    /// [`initialize`](Self::initialize) next.
    pub async fn spawn(
        command: &str,
        args: &[String],
        envs: &HashMap<String, String>,
    ) -> Result<Self> {
        debug!("Spawning tool server: {} {}", command, args.join(" "));

        let mut cmd = Command::new(command);
        cmd.args(args)
            .envs(envs)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());

        // Linux: request kernel to send SIGTERM to child when parent dies.
        // This catches cases where Drop doesn't run (SIGKILL, OOM kill).
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        let mut child = cmd.spawn()?;

        let stdin = child.stdin.take().ok_or_else(|| {
            McpError::SpawnError(std::io::Error::other("Failed to capture stdin"))
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            McpError::SpawnError(std::io::Error::other("Failed to capture stdout"))
        })?;

        let pending_responses: Arc<Mutex<PendingMap>> =
            Arc::new(Mutex::new(HashMap::new()));
        let writer = Arc::new(Mutex::new(BufWriter::new(stdin)));

        let pending_bg = Arc::clone(&pending_responses);
        let writer_bg = Arc::clone(&writer);
        let reader_handle = tokio::spawn(async move {
            Self::reader_loop(stdout, pending_bg, writer_bg).await;
        });

        Ok(Self {
            _reader_handle: reader_handle,
            pending_responses,
            writer,
            child,
        })
    }

    /// Background reader loop — single owner of the child's stdout.
    ///
    /// Runs until the pipe closes or an I/O error occurs. Each line is
    /// parsed as a JSON-RPC frame, classified by [`classify_message`], and
    /// dispatched:
    ///
    /// - **Response** → `pending_responses` oneshot (request correlation)
    /// - **Notification** → logged; this pipeline consumes none
    /// - **IncomingRequest** → answered with `method not found` so the
    ///   server does not hang waiting on a reply we will never produce
    ///
    /// When the loop exits, pending senders are dropped so waiting callers
    /// observe [`McpError::TransportClosed`].
    async fn reader_loop(
        stdout: ChildStdout,
        pending_responses: Arc<Mutex<PendingMap>>,
        writer: Arc<Mutex<BufWriter<ChildStdin>>>,
    ) {
        let mut reader = BufReader::new(stdout);
        let mut line = String::new();

        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    debug!("Reader loop: tool server closed stdout");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Reader loop: read error: {}", e);
                    break;
                }
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            trace!("Tool server sent: {}", trimmed);

            let json_value: serde_json::Value = match serde_json::from_str(trimmed) {
                Ok(v) => v,
                Err(e) => {
                    warn!("Reader loop: failed to parse JSON: {} — {}", e, trimmed);
                    continue;
                }
            };

            match classify_message(&json_value) {
                MessageKind::Response => {
                    if let Some(id) = json_value.get("id").and_then(|v| v.as_u64()) {
                        let response: JsonRpcResponse = match serde_json::from_value(json_value) {
                            Ok(r) => r,
                            Err(e) => {
                                warn!("Reader loop: failed to parse response: {}", e);
                                continue;
                            }
                        };
                        let sender = {
                            let mut pending = pending_responses.lock().await;
                            pending.remove(&id)
                        };
                        if let Some(tx) = sender {
                            let _ = tx.send(response);
                        } else {
                            debug!("Reader loop: no pending receiver for response id={}", id);
                        }
                    }
                }
                MessageKind::IncomingRequest { id } => {
                    let method = json_value
                        .get("method")
                        .and_then(|v| v.as_str())
                        .unwrap_or("");
                    debug!(
                        "Reader loop: rejecting server request method={} id={}",
                        method, id
                    );
                    let rejection = JsonRpcErrorOut::method_not_found(id, method);
                    if let Ok(json) = serde_json::to_string(&rejection) {
                        let mut w = writer.lock().await;
                        let _ = w.write_all(json.as_bytes()).await;
                        let _ = w.write_all(b"\n").await;
                        let _ = w.flush().await;
                    }
                }
                MessageKind::Notification => {
                    let method = json_value
                        .get("method")
                        .and_then(|v| v.as_str())
                        .unwrap_or("");
                    trace!("Reader loop: notification method={}", method);
                }
            }
        }

        // Reader ended — drop pending senders so waiters get TransportClosed
        let mut pending = pending_responses.lock().await;
        pending.clear();
    }

    /// Perform the `initialize` handshake.
    ///
    /// Sends `initialize`, waits for the server's result, then confirms
    /// with the `notifications/initialized` notification. A failure here is
    /// the one fault with no fallback: callers are expected to abort the
    /// run.
    pub async fn initialize(&self, client_name: &str, client_version: &str) -> Result<InitializeResult> {
        let params = InitializeParams::new(client_name, client_version);
        let request = JsonRpcRequest::new("initialize", Some(serde_json::to_value(&params)?));

        let response = tokio::time::timeout(INITIALIZE_TIMEOUT, self.request(&request))
            .await
            .map_err(|_| McpError::Timeout("initialize handshake".into()))??;

        let result = Self::expect_result(response)?;
        let init: InitializeResult = serde_json::from_value(result)?;

        self.send_notification(&JsonRpcNotification::new("notifications/initialized"))
            .await?;

        info!(
            "Tool server initialized: {} {} (protocol {})",
            init.server_info.name, init.server_info.version, init.protocol_version
        );
        Ok(init)
    }

    /// List the tools the server exposes (diagnostic).
    pub async fn list_tools(&self) -> Result<Vec<ToolInfo>> {
        let request = JsonRpcRequest::new("tools/list", None);
        let response = self.request(&request).await?;
        let result = Self::expect_result(response)?;
        let list: ListToolsResult = serde_json::from_value(result)?;
        Ok(list.tools)
    }

    /// Invoke a named tool with structured arguments.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult> {
        let params = CallToolParams {
            name: name.to_string(),
            arguments,
        };
        let request = JsonRpcRequest::new("tools/call", Some(serde_json::to_value(&params)?));
        let response = self.request(&request).await?;
        let result = Self::expect_result(response)?;
        Ok(serde_json::from_value(result)?)
    }

    /// Send a JSON-RPC request and wait for the correlated response.
    ///
    /// Uses a `oneshot` channel: the request ID is registered in
    /// `pending_responses`, and the background reader task fulfils it when
    /// the matching response arrives.
    async fn request(&self, request: &JsonRpcRequest) -> Result<JsonRpcResponse> {
        let (tx, rx) = oneshot::channel();
        let request_id = request.id;

        {
            let mut pending = self.pending_responses.lock().await;
            pending.insert(request_id, tx);
        }

        if let Err(e) = self.send_frame(request).await {
            // Clean up the pending entry to prevent leaks
            let mut pending = self.pending_responses.lock().await;
            pending.remove(&request_id);
            return Err(e);
        }

        rx.await.map_err(|_| McpError::TransportClosed)
    }

    /// Send a notification (fire-and-forget).
    async fn send_notification(&self, notification: &JsonRpcNotification) -> Result<()> {
        self.send_frame(notification).await
    }

    /// Write one newline-delimited JSON frame to the child's stdin.
    async fn send_frame<T: serde::Serialize>(&self, frame: &T) -> Result<()> {
        let json = serde_json::to_string(frame)?;
        trace!("Client sending: {}", json);

        let mut writer = self.writer.lock().await;
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }

    /// Unwrap a response into its result, mapping RPC errors.
    fn expect_result(response: JsonRpcResponse) -> Result<serde_json::Value> {
        if let Some(error) = response.error {
            return Err(McpError::RpcError {
                code: error.code,
                message: error.message,
            });
        }
        response
            .result
            .ok_or_else(|| McpError::UnexpectedResponse("response had neither result nor error".into()))
    }
}

impl Drop for McpClient {
    fn drop(&mut self) {
        debug!("McpClient dropping, killing tool server child process");
        let _ = self.child.start_kill();
    }
}
