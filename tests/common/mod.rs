//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use vhost_proxy::config::{ListenerConfig, ProxyConfig, TimeoutConfig, TlsConfig};
use vhost_proxy::lifecycle::Shutdown;
use vhost_proxy::{HttpServer, RoutingTable};

/// A request as seen by a mock upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub version: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// First value of a header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Every value of a header, in wire order.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

/// A raw HTTP/1.1 response with the given status line, extra headers and body.
pub fn raw_response(status: &str, headers: &[(&str, &str)], body: &str) -> String {
    let mut response = format!("HTTP/1.1 {}\r\nContent-Length: {}\r\n", status, body.len());
    for (name, value) in headers {
        response.push_str(&format!("{}: {}\r\n", name, value));
    }
    response.push_str("Connection: close\r\n\r\n");
    response.push_str(body);
    response
}

/// Start a mock upstream that records every request and answers with `response`.
pub async fn start_recording_backend(
    response: String,
) -> (SocketAddr, mpsc::UnboundedReceiver<RecordedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    let response = Arc::new(response);

    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            let tx = tx.clone();
            let response = response.clone();
            tokio::spawn(async move {
                let (read_half, mut write_half) = socket.into_split();
                let mut reader = BufReader::new(read_half);
                if let Some(request) = read_request(&mut reader).await {
                    let _ = tx.send(request);
                    let _ = write_half.write_all(response.as_bytes()).await;
                    let _ = write_half.shutdown().await;
                }
            });
        }
    });

    (addr, rx)
}

/// Start a mock upstream that accepts connections and never answers.
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address with nothing listening on it.
pub async fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// A proxy running in the background until this value is dropped.
pub struct TestProxy {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestProxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the proxy on an ephemeral loopback port.
pub fn start_proxy(upstreams: &[String], timeout_secs: u64, tls: Option<TlsConfig>) -> TestProxy {
    let config = ProxyConfig {
        listener: ListenerConfig {
            bind_address: "127.0.0.1:0".to_string(),
            tls,
            ..ListenerConfig::default()
        },
        timeouts: TimeoutConfig {
            request_secs: timeout_secs,
        },
        upstreams: upstreams.to_vec(),
        ..ProxyConfig::default()
    };

    let routes = Arc::new(RoutingTable::build(&config.upstreams).unwrap());
    let listener = vhost_proxy::net::bind(&config.listener.bind_address).unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, routes);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestProxy { addr, shutdown }
}

/// Send raw bytes to `addr` and read the whole reply until the peer closes.
pub async fn raw_exchange(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut reply = Vec::new();
    tokio::time::timeout(Duration::from_secs(10), stream.read_to_end(&mut reply))
        .await
        .expect("proxy did not close the connection")
        .unwrap();
    String::from_utf8_lossy(&reply).into_owned()
}

async fn read_line<R: AsyncRead + Unpin>(reader: &mut BufReader<R>) -> Option<String> {
    use tokio::io::AsyncBufReadExt;

    let mut line = String::new();
    let n = reader.read_line(&mut line).await.ok()?;
    if n == 0 {
        return None;
    }
    Some(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn read_request<R: AsyncRead + Unpin>(reader: &mut BufReader<R>) -> Option<RecordedRequest> {
    let request_line = read_line(reader).await?;
    let mut parts = request_line.splitn(3, ' ');
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();
    let version = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let line = read_line(reader).await?;
        if line.is_empty() {
            break;
        }
        let (name, value) = line.split_once(':')?;
        headers.push((name.trim().to_string(), value.trim().to_string()));
    }

    let mut request = RecordedRequest {
        method,
        target,
        version,
        headers,
        body: Vec::new(),
    };

    if let Some(len) = request.header("content-length") {
        let len: usize = len.parse().ok()?;
        let mut body = vec![0; len];
        reader.read_exact(&mut body).await.ok()?;
        request.body = body;
    } else if request
        .header("transfer-encoding")
        .is_some_and(|te| te.eq_ignore_ascii_case("chunked"))
    {
        loop {
            let size_line = read_line(reader).await?;
            let size = usize::from_str_radix(size_line.split(';').next()?.trim(), 16).ok()?;
            if size == 0 {
                // trailers end with an empty line
                while !read_line(reader).await?.is_empty() {}
                break;
            }
            let mut chunk = vec![0; size];
            reader.read_exact(&mut chunk).await.ok()?;
            request.body.extend_from_slice(&chunk);
            read_line(reader).await?;
        }
    }

    Some(request)
}
