use std::fmt;
use std::time::Duration;

pub(crate) const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub(crate) const READ_TIMEOUT: Duration = Duration::from_secs(15);

/// A failed catalog request. Failures are terminal for the attempt that
/// raised them; there is no retry path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FetchError {
    Status(u16, String),
    Transport(String),
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status, detail) => {
                if detail.is_empty() {
                    write!(f, "HTTP status {status}")
                } else {
                    write!(f, "HTTP status {status} ({detail})")
                }
            }
            Self::Transport(detail) => write!(f, "transport error: {detail}"),
            Self::Decode(detail) => write!(f, "response decode failed: {detail}"),
        }
    }
}

impl std::error::Error for FetchError {}

pub(crate) fn get_text(
    url: &str,
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<String, FetchError> {
    let agent = ureq::AgentBuilder::new()
        .timeout_connect(connect_timeout)
        .timeout_read(read_timeout)
        .timeout_write(read_timeout)
        .build();

    match agent.get(url).call() {
        Ok(response) => response
            .into_string()
            .map_err(|err| FetchError::Decode(err.to_string())),
        Err(ureq::Error::Status(status, response)) => {
            let response_body = response.into_string().ok().unwrap_or_default();
            let body = response_body.trim();
            let detail = body.chars().take(240).collect::<String>();
            Err(FetchError::Status(status, detail))
        }
        Err(ureq::Error::Transport(err)) => Err(FetchError::Transport(err.to_string())),
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    use std::collections::HashMap;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Loopback HTTP server mapping request paths to canned responses and
    /// counting how many requests each path received.
    #[derive(Debug)]
    pub(crate) struct TestServer {
        pub(crate) base_url: String,
        counts: Arc<Mutex<HashMap<String, usize>>>,
        total: Arc<AtomicUsize>,
        shutdown_tx: mpsc::Sender<()>,
        join_handle: Option<std::thread::JoinHandle<()>>,
    }

    impl TestServer {
        pub(crate) fn spawn(routes: Vec<(String, u16, String)>) -> Self {
            let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind test server");
            listener.set_nonblocking(true).expect("set nonblocking");
            let addr = listener.local_addr().expect("local addr");

            let counts = Arc::new(Mutex::new(HashMap::new()));
            let counts_clone = Arc::clone(&counts);
            let total = Arc::new(AtomicUsize::new(0));
            let total_clone = Arc::clone(&total);
            let shared_routes: Arc<HashMap<String, (u16, String)>> = Arc::new(
                routes
                    .into_iter()
                    .map(|(path, status, body)| (path, (status, body)))
                    .collect(),
            );
            let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

            let join_handle = std::thread::spawn(move || {
                loop {
                    if shutdown_rx.try_recv().is_ok() {
                        break;
                    }

                    match listener.accept() {
                        Ok((mut stream, _)) => {
                            total_clone.fetch_add(1, Ordering::SeqCst);
                            let routes = Arc::clone(&shared_routes);
                            let counts = Arc::clone(&counts_clone);
                            std::thread::spawn(move || {
                                let path = read_request_path(&mut stream);
                                if let Some(path) = path.as_deref() {
                                    let mut counts = counts.lock().expect("lock counts");
                                    *counts.entry(path.to_string()).or_insert(0) += 1;
                                }
                                let (status, body) = path
                                    .as_deref()
                                    .and_then(|path| routes.get(path).cloned())
                                    .unwrap_or((404, "no such route".to_string()));
                                let _ = write_response(&mut stream, status, &body);
                            });
                        }
                        Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                            std::thread::sleep(Duration::from_millis(5));
                        }
                        Err(_) => break,
                    }
                }
            });

            Self {
                base_url: format!("http://{addr}"),
                counts,
                total,
                shutdown_tx,
                join_handle: Some(join_handle),
            }
        }

        pub(crate) fn request_count(&self, path: &str) -> usize {
            self.counts
                .lock()
                .expect("lock counts")
                .get(path)
                .copied()
                .unwrap_or(0)
        }

        pub(crate) fn total_requests(&self) -> usize {
            self.total.load(Ordering::SeqCst)
        }
    }

    impl Drop for TestServer {
        fn drop(&mut self) {
            let _ = self.shutdown_tx.send(());
            if let Some(handle) = self.join_handle.take() {
                let _ = handle.join();
            }
        }
    }

    fn read_request_path(stream: &mut TcpStream) -> Option<String> {
        stream
            .set_read_timeout(Some(Duration::from_millis(200)))
            .ok()?;
        let mut buf = [0_u8; 1024];
        let mut data = Vec::new();
        loop {
            match stream.read(&mut buf) {
                Ok(0) => break,
                Ok(read) => {
                    data.extend_from_slice(&buf[..read]);
                    if data.windows(4).any(|window| window == b"\r\n\r\n") {
                        break;
                    }
                }
                Err(err)
                    if err.kind() == std::io::ErrorKind::WouldBlock
                        || err.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break;
                }
                Err(_) => return None,
            }
        }

        let request = String::from_utf8_lossy(&data);
        let request_line = request.lines().next()?;
        let mut parts = request_line.split_whitespace();
        let _method = parts.next()?;
        parts.next().map(str::to_string)
    }

    fn reason_phrase(status: u16) -> &'static str {
        match status {
            200 => "OK",
            404 => "Not Found",
            500 => "Internal Server Error",
            503 => "Service Unavailable",
            _ => "Status",
        }
    }

    fn write_response(stream: &mut TcpStream, status: u16, body: &str) -> std::io::Result<()> {
        let reason = reason_phrase(status);
        let payload = body.as_bytes();
        write!(
            stream,
            "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            payload.len()
        )?;
        stream.write_all(payload)?;
        stream.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::test_server::TestServer;
    use super::*;

    #[test]
    fn returns_body_on_success() {
        let server = TestServer::spawn(vec![("/ok".to_string(), 200, "hello".to_string())]);

        let body = get_text(
            &format!("{}/ok", server.base_url),
            Duration::from_millis(500),
            Duration::from_millis(500),
        );

        assert_eq!(body.expect("request should succeed"), "hello");
        assert_eq!(server.request_count("/ok"), 1);
    }

    #[test]
    fn surfaces_http_status_failures_without_retrying() {
        let server =
            TestServer::spawn(vec![("/missing".to_string(), 404, "not-found".to_string())]);

        let err = get_text(
            &format!("{}/missing", server.base_url),
            Duration::from_millis(500),
            Duration::from_millis(500),
        )
        .expect_err("404 should surface as an error");

        assert_eq!(err, FetchError::Status(404, "not-found".to_string()));
        assert_eq!(server.request_count("/missing"), 1);
    }

    #[test]
    fn surfaces_server_errors_as_terminal() {
        let server = TestServer::spawn(vec![("/down".to_string(), 503, "down".to_string())]);

        let err = get_text(
            &format!("{}/down", server.base_url),
            Duration::from_millis(500),
            Duration::from_millis(500),
        )
        .expect_err("503 should surface as an error");

        assert!(matches!(err, FetchError::Status(503, _)));
        assert_eq!(server.request_count("/down"), 1);
    }

    #[test]
    fn surfaces_transport_failures() {
        // Nothing listens on the port once the server is dropped.
        let server = TestServer::spawn(vec![]);
        let url = format!("{}/gone", server.base_url);
        drop(server);

        let err = get_text(&url, Duration::from_millis(300), Duration::from_millis(300))
            .expect_err("connection refused should surface as a transport error");

        assert!(matches!(err, FetchError::Transport(_)));
    }
}
