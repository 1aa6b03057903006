//! Minimal HTTP/1.1 server for caption download tests.
//!
//! Serves fixed bodies by request path; unknown paths get 404. A path can
//! also be registered as a redirect to another path.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
enum Route {
    Body(String),
    Redirect(String),
}

#[derive(Debug, Clone, Default)]
pub struct CaptionServer {
    routes: HashMap<String, Route>,
}

impl CaptionServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, path: &str, body: &str) -> Self {
        self.routes.insert(path.to_string(), Route::Body(body.to_string()));
        self
    }

    pub fn redirect(mut self, from: &str, to: &str) -> Self {
        self.routes.insert(from.to_string(), Route::Redirect(to.to_string()));
        self
    }

    /// Starts the server in a background thread. Returns the base URL without
    /// a trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
    pub fn start(self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes = Arc::new(self.routes);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                thread::spawn(move || handle(stream, &routes));
            }
        });
        format!("http://127.0.0.1:{}", port)
    }
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    let response = match routes.get(path) {
        Some(Route::Body(body)) => format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/vtt\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        ),
        Some(Route::Redirect(to)) => format!(
            "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            to
        ),
        None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string(),
    };
    let _ = stream.write_all(response.as_bytes());
}
