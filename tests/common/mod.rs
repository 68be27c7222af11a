//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use cryptounifier::WalletClient;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

pub const WALLET_KEY: &str = "test-wallet-key";
pub const SECRET_KEY: &str = "test secret&key=1";

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

#[allow(dead_code)]
impl CapturedRequest {
    /// Decoded form fields, in wire order.
    pub fn form(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn field(&self, name: &str) -> Option<String> {
        self.form().into_iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn field_names(&self) -> Vec<String> {
        self.form().into_iter().map(|(k, _)| k).collect()
    }
}

/// How the mock backend answers each connection.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Reply {
    /// Status line code and body.
    Respond(u16, String),
    /// Redirect status with a `Location` header and an empty body.
    Redirect(u16, String),
    /// Read the request, then close without answering.
    Hangup,
}

pub struct MockBackend {
    pub addr: SocketAddr,
    requests: mpsc::UnboundedReceiver<CapturedRequest>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn endpoint(&self) -> String {
        format!("http://{}/api/v1/", self.addr)
    }

    /// A client pointed at this backend with the test credentials.
    pub fn client(&self) -> WalletClient {
        WalletClient::builder()
            .wallet_key(WALLET_KEY)
            .secret_key(SECRET_KEY)
            .endpoint(self.endpoint())
            .timeout_secs(5)
            .no_proxy()
            .build()
            .unwrap()
    }

    /// A request already received, without waiting.
    pub fn try_next_request(&mut self) -> Option<CapturedRequest> {
        self.requests.try_recv().ok()
    }

    pub async fn next_request(&mut self) -> CapturedRequest {
        tokio::time::timeout(Duration::from_secs(5), self.requests.recv())
            .await
            .expect("timed out waiting for request")
            .expect("backend stopped")
    }
}

/// Start a mock backend that answers every request with a JSON body.
#[allow(dead_code)]
pub async fn start_json_backend(body: &str) -> MockBackend {
    start_mock_backend(Reply::Respond(200, body.to_string())).await
}

/// Start a mock backend on an ephemeral port that records every request.
pub async fn start_mock_backend(reply: Reply) -> MockBackend {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, requests) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let tx = tx.clone();
                    let reply = reply.clone();
                    tokio::spawn(async move {
                        let _ = handle(socket, tx, reply).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockBackend { addr, requests }
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api/v1/", addr)
}

async fn handle(
    socket: TcpStream,
    tx: mpsc::UnboundedSender<CapturedRequest>,
    reply: Reply,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(socket);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    let mut content_type = None;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).await?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("content-type") {
                content_type = Some(value.to_string());
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await?;

    let _ = tx.send(CapturedRequest {
        method,
        path,
        content_type,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let mut socket = reader.into_inner();
    match reply {
        Reply::Respond(status, body) => {
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line(status),
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await?;
        }
        Reply::Redirect(status, location) => {
            let response = format!(
                "HTTP/1.1 {}\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                status_line(status),
                location
            );
            socket.write_all(response.as_bytes()).await?;
        }
        Reply::Hangup => {}
    }
    socket.shutdown().await
}

fn status_line(status: u16) -> String {
    let reason = match status {
        200 => "OK",
        301 => "Moved Permanently",
        302 => "Found",
        307 => "Temporary Redirect",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    };
    format!("{status} {reason}")
}
