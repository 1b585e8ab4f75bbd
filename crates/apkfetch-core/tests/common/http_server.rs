//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed table of routes (path -> status, headers, body). Unknown
//! paths get 404. A route can stall before responding to exercise timeouts,
//! or advertise more body than it sends to exercise short reads.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    /// Full status, e.g. "200 OK" or "500 Internal Server Error".
    pub status: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Sleep this long before writing anything.
    pub stall: Option<Duration>,
    /// Content-Length to advertise instead of the real body length.
    pub declared_len: Option<usize>,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::status("200 OK", body)
    }

    pub fn status(status: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: status.to_string(),
            headers: Vec::new(),
            body: body.into(),
            stall: None,
            declared_len: None,
        }
    }

    pub fn redirect(location: &str) -> Self {
        let mut r = Self::status("302 Found", b"moved".to_vec());
        r.headers.push(("Location".to_string(), location.to_string()));
        r
    }

    pub fn stalled(mut self, d: Duration) -> Self {
        self.stall = Some(d);
        self
    }

    /// Advertise `len` body bytes, send what the route has, then close.
    pub fn truncated(mut self, len: usize) -> Self {
        self.declared_len = Some(len);
        self
    }
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/");

    let not_found = Route::status("404 Not Found", b"not found".to_vec());
    let route = routes.get(path).unwrap_or(&not_found);
    if let Some(d) = route.stall {
        thread::sleep(d);
    }
    let mut head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        route.status,
        route.declared_len.unwrap_or(route.body.len())
    );
    for (k, v) in &route.headers {
        head.push_str(&format!("{}: {}\r\n", k, v));
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&route.body);
    let _ = stream.flush();
}
