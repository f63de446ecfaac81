//! Minimal HTTP/1.1 server for integration tests.
//!
//! Answers each connection with the next scripted reply (repeating the last
//! one when the script runs out) and remembers every request target.

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub enum Reply {
    /// Status line (e.g. "200 OK") and JSON body.
    Json(&'static str, Vec<u8>),
    /// 200 OK announcing `announced` bytes but sending only `body`, then closing.
    Truncated { announced: usize, body: Vec<u8> },
}

#[derive(Clone)]
pub struct ApiServer {
    pub base_url: String,
    targets: Arc<Mutex<Vec<String>>>,
}

impl ApiServer {
    /// Request targets seen so far (path plus query).
    pub fn targets(&self) -> Vec<String> {
        self.targets.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. `base_url` ends in `/search/?`.
pub fn start(replies: Vec<Reply>) -> ApiServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let targets = Arc::new(Mutex::new(Vec::new()));
    let script = Arc::new(Mutex::new(VecDeque::from(replies)));
    let seen = Arc::clone(&targets);
    thread::spawn(move || {
        let mut last: Option<Reply> = None;
        for stream in listener.incoming().flatten() {
            let reply = match script.lock().unwrap().pop_front() {
                Some(r) => {
                    last = Some(r.clone());
                    r
                }
                None => match &last {
                    Some(r) => r.clone(),
                    None => continue,
                },
            };
            handle(stream, reply, &seen);
        }
    });
    ApiServer {
        base_url: format!("http://127.0.0.1:{}/search/?", port),
        targets,
    }
}

/// An address nothing listens on.
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/search/?", port)
}

fn handle(mut stream: TcpStream, reply: Reply, seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    if let Some(target) = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
    {
        seen.lock().unwrap().push(target.to_string());
    }
    match reply {
        Reply::Json(status, body) => {
            let head = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&body);
        }
        Reply::Truncated { announced, body } => {
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n",
                announced
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&body);
        }
    }
    let _ = stream.flush();
}
