//! Shared test fixtures: a minimal HTTP server and a scripted library.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use arlo_downloader::config::{AccountConfig, Config, OptionsConfig, WindowStrategy};
use arlo_downloader::{DateWindow, Error, Recording, RecordingLibrary, Result, Session};
use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone)]
struct Route {
    status: u16,
    body: Vec<u8>,
    /// Advertised `Content-Length`, when it differs from the body sent.
    declared_len: Option<usize>,
}

#[derive(Default)]
struct ServerState {
    routes: Mutex<HashMap<String, Route>>,
    requests: Mutex<Vec<RecordedRequest>>,
    gate: Option<Arc<Semaphore>>,
}

/// HTTP/1.1 server answering canned responses, one connection per request.
pub struct TestServer {
    addr: SocketAddr,
    state: Arc<ServerState>,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestServer {
    pub async fn start() -> Self {
        Self::spawn(None).await
    }

    /// A server that holds every response until [`release`](Self::release).
    pub async fn start_gated() -> Self {
        Self::spawn(Some(Arc::new(Semaphore::new(0)))).await
    }

    async fn spawn(gate: Option<Arc<Semaphore>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(ServerState {
            gate,
            ..Default::default()
        });

        let accept_state = Arc::clone(&state);
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let state = Arc::clone(&accept_state);
                tokio::spawn(async move {
                    let _ = handle_connection(stream, state).await;
                });
            }
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn route(&self, path: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.insert_route(path, status, body.into(), None);
    }

    /// A 200 response announcing `declared_len` bytes, closed after `body`.
    pub fn truncated_route(&self, path: &str, declared_len: usize, body: impl Into<Vec<u8>>) {
        self.insert_route(path, 200, body.into(), Some(declared_len));
    }

    fn insert_route(&self, path: &str, status: u16, body: Vec<u8>, declared_len: Option<usize>) {
        self.state.routes.lock().unwrap().insert(
            path.to_string(),
            Route {
                status,
                body,
                declared_len,
            },
        );
    }

    pub fn json_route(&self, path: &str, status: u16, body: serde_json::Value) {
        self.route(path, status, body.to_string());
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Let `n` held responses through.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.state.gate {
            gate.add_permits(n);
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

async fn handle_connection(mut stream: TcpStream, state: Arc<ServerState>) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = find_header_end(&buf) {
            break end;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let target = request_line.next().unwrap_or_default();
    let path = target.split('?').next().unwrap_or_default().to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
        .collect();

    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: path.clone(),
        headers,
        body,
    });

    if let Some(gate) = &state.gate {
        if let Ok(permit) = gate.acquire().await {
            permit.forget();
        }
    }

    let route = state
        .routes
        .lock()
        .unwrap()
        .get(&path)
        .cloned()
        .unwrap_or(Route {
            status: 404,
            body: b"not found".to_vec(),
            declared_len: None,
        });

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        if route.status < 400 { "OK" } else { "Error" },
        route.declared_len.unwrap_or(route.body.len())
    );
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(&route.body).await?;
    stream.flush().await?;
    stream.shutdown().await
}

/// HTTP client that ignores proxy settings of the test environment.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// A library answering each window query with the next scripted response.
pub struct MockLibrary {
    login_error: Option<String>,
    responses: Mutex<Vec<Result<Vec<Recording>>>>,
    pub queried: Mutex<Vec<DateWindow>>,
    pub login_calls: Mutex<u32>,
}

impl MockLibrary {
    /// Every query returns nothing beyond the scripted responses.
    pub fn new(mut responses: Vec<Result<Vec<Recording>>>) -> Self {
        responses.reverse();
        Self {
            login_error: None,
            responses: Mutex::new(responses),
            queried: Mutex::new(Vec::new()),
            login_calls: Mutex::new(0),
        }
    }

    pub fn with_recordings(recordings: Vec<Recording>) -> Self {
        Self::new(vec![Ok(recordings)])
    }

    pub fn rejecting_login(message: &str) -> Self {
        Self {
            login_error: Some(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    pub fn queried_windows(&self) -> Vec<DateWindow> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordingLibrary for MockLibrary {
    async fn login(&self, _email: &str, _password: &str) -> Result<Session> {
        *self.login_calls.lock().unwrap() += 1;
        match &self.login_error {
            Some(message) => Err(Error::Authentication(message.clone())),
            None => Ok(Session {
                token: "token".to_string(),
                user_id: "user".to_string(),
            }),
        }
    }

    async fn fetch_library(&self, _session: &Session, window: &DateWindow) -> Result<Vec<Recording>> {
        self.queried.lock().unwrap().push(*window);
        self.responses
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn test_config(output_dir: &Path, workers: usize, days: u32, strategy: WindowStrategy) -> Config {
    Config {
        account: AccountConfig {
            email: "someone@mail.test".to_string(),
            password: "password".to_string(),
        },
        options: OptionsConfig {
            days,
            workers,
            output_directory: output_dir.to_path_buf(),
            window_strategy: strategy,
        },
    }
}

/// Recording whose content is served by `server` at `/videos/<id>.mp4`.
pub fn served_recording(server: &TestServer, id: &str, created_at: i64) -> Recording {
    let path = format!("/videos/{}.mp4", id);
    server.route(&path, 200, format!("video-{}", id));
    Recording::new(id, created_at, server.url(&path))
}

/// Sorted file names of a directory.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Poll `condition` until it holds or a few seconds pass.
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    condition()
}
