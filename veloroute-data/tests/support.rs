//! A one-shot HTTP server standing in for a Valhalla instance.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// How the stub answers its single request.
pub enum Reply {
    /// Respond with a JSON body and status.
    Json { status: u16, body: String },
    /// Accept the connection but never answer.
    Silent,
}

/// A server accepting exactly one request.
pub struct StubServer {
    /// Base URL to point the backend at.
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl StubServer {
    /// Bind to an ephemeral port and answer the first request with `reply`.
    pub async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept request");
            let request = read_request(&mut stream).await;
            match reply {
                Reply::Json { status, body } => {
                    let response = format!(
                        "HTTP/1.1 {status} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        reason(status),
                        body.len()
                    );
                    stream
                        .write_all(response.as_bytes())
                        .await
                        .expect("write response");
                    stream.shutdown().await.expect("close stream");
                }
                Reply::Silent => {
                    tokio::time::sleep(std::time::Duration::from_secs(30)).await;
                }
            }
            request
        });
        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    /// The raw request the server received.
    pub async fn request(self) -> String {
        self.handle.await.expect("stub server task")
    }
}

/// A base URL with nothing listening behind it.
pub async fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 4096];
    loop {
        let read = stream.read(&mut chunk).await.expect("read request");
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
        if let Some(end) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buffer[..end]).to_ascii_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buffer.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        502 => "Bad Gateway",
        _ => "Unknown",
    }
}
