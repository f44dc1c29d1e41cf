//! Minimal HTTP/1.1 server that serves canned JSON per path for integration tests.
//!
//! Routes can be added after start. Unknown paths get a 404 with a JSON
//! `detail` body, the way the real API answers.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Route {
    /// 200 with this body (sent as-is, so it need not be valid JSON).
    Body(String),
    /// Same as `Body`, after sleeping this long.
    Delayed(Duration, String),
    /// Close the connection without answering.
    Drop,
}

#[derive(Clone)]
pub struct JsonServer {
    base: String,
    routes: Arc<Mutex<HashMap<String, Route>>>,
}

impl JsonServer {
    /// Starts a server in a background thread. It runs until the process exits.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<Mutex<HashMap<String, Route>>> = Arc::default();
        let shared = Arc::clone(&routes);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&shared);
                thread::spawn(move || handle(stream, &routes));
            }
        });
        Self {
            base: format!("http://127.0.0.1:{}/", port),
            routes,
        }
    }

    /// API root clients should use, e.g. `http://127.0.0.1:PORT/api/`.
    pub fn api_root(&self) -> String {
        format!("{}api/", self.base)
    }

    /// Absolute URL of `path` (which starts with '/').
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base.trim_end_matches('/'), path)
    }

    pub fn route(&self, path: &str, route: Route) {
        self.routes.lock().unwrap().insert(path.to_string(), route);
    }

    pub fn json(&self, path: &str, body: serde_json::Value) {
        self.route(path, Route::Body(body.to_string()));
    }
}

fn handle(mut stream: TcpStream, routes: &Mutex<HashMap<String, Route>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let route = routes.lock().unwrap().get(&path).cloned();
    let (status, body) = match route {
        Some(Route::Body(body)) => ("200 OK", body),
        Some(Route::Delayed(delay, body)) => {
            thread::sleep(delay);
            ("200 OK", body)
        }
        Some(Route::Drop) => return,
        None => ("404 Not Found", r#"{"detail":"Not found"}"#.to_string()),
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}
