//! In-process HTTP stub for integration tests.
//!
//! Serves canned responses keyed by request target (path plus query) on
//! an ephemeral localhost port and records every request it sees, so
//! tests can assert which endpoints were called and with what headers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use api_validator::api::ApiClient;
use api_validator::config::Settings;
use api_validator::interrupt::Interrupt;
use api_validator::ui::{Event, LineSource};

#[derive(Clone, Debug)]
pub struct Recorded {
    pub target: String,
    pub user_agent: Option<String>,
}

struct Canned {
    status: u16,
    body: Vec<u8>,
}

pub struct StubServer {
    pub base_url: String,
    routes: Arc<Mutex<HashMap<String, Canned>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    /// Start a server that answers unknown targets with `404 {}`.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let routes: Arc<Mutex<HashMap<String, Canned>>> = Arc::default();
        let requests: Arc<Mutex<Vec<Recorded>>> = Arc::default();

        let (r, q) = (Arc::clone(&routes), Arc::clone(&requests));
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                handle(stream, &r, &q);
            }
        });

        StubServer {
            base_url,
            routes,
            requests,
        }
    }

    /// Answer `target` (e.g. `/users/1` or `/posts?userId=1`).
    pub fn route(self, target: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.routes.lock().unwrap().insert(
            target.to_string(),
            Canned {
                status,
                body: body.into(),
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn targets(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.target).collect()
    }

    /// A client pointed at this server, without pacing delays.
    pub fn client(&self) -> ApiClient {
        client_for(&self.base_url)
    }
}

pub fn client_for(base_url: &str) -> ApiClient {
    let settings = Settings::default()
        .with_base_url(base_url)
        .with_pacing(Duration::ZERO)
        .with_timeout(Duration::from_secs(5));
    ApiClient::new(settings).expect("build client")
}

/// A base URL on which nothing is listening.
pub fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// A base URL that accepts connections but never answers.
pub fn silent_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    format!("http://{}", addr)
}

fn handle(
    stream: TcpStream,
    routes: &Mutex<HashMap<String, Canned>>,
    requests: &Mutex<Vec<Recorded>>,
) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let target = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();

    let mut user_agent = None;
    loop {
        let mut header = String::new();
        match reader.read_line(&mut header) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.eq_ignore_ascii_case("user-agent") {
                user_agent = Some(value.trim().to_string());
            }
        }
    }

    requests.lock().unwrap().push(Recorded {
        target: target.clone(),
        user_agent,
    });

    let (status, body) = match routes.lock().unwrap().get(&target) {
        Some(canned) => (canned.status, canned.body.clone()),
        None => (404, b"{}".to_vec()),
    };

    let mut stream = stream;
    let head = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&body);
    let _ = stream.flush();
}

/// Feeds fixed lines to the prompt loop, then reports end of input.
pub struct ScriptedInput {
    events: Vec<Event>,
    pub prompts: usize,
    /// Raised when the given 1-based read returns, as if Ctrl-C came in
    /// while the line was being entered.
    interrupt_on: Option<(usize, Interrupt)>,
}

impl ScriptedInput {
    pub fn lines(lines: &[&str]) -> Self {
        Self::events(lines.iter().map(|l| Event::Line(l.to_string())).collect())
    }

    pub fn events(mut events: Vec<Event>) -> Self {
        events.reverse();
        ScriptedInput {
            events,
            prompts: 0,
            interrupt_on: None,
        }
    }

    pub fn interrupt_on_read(mut self, read: usize, interrupt: &Interrupt) -> Self {
        self.interrupt_on = Some((read, interrupt.clone()));
        self
    }
}

impl LineSource for ScriptedInput {
    fn read_line<W: Write>(&mut self, _prompt: &str, _out: &mut W) -> std::io::Result<Event> {
        self.prompts += 1;
        if let Some((read, interrupt)) = &self.interrupt_on {
            if *read == self.prompts {
                interrupt.trigger();
            }
        }
        Ok(self.events.pop().unwrap_or(Event::EndOfInput))
    }
}

/// Console sink that raises `interrupt` once `marker` has been written,
/// standing in for a Ctrl-C that arrives mid-lookup.
pub struct InterruptingWriter {
    buf: Vec<u8>,
    marker: &'static str,
    interrupt: Interrupt,
}

impl InterruptingWriter {
    pub fn new(marker: &'static str, interrupt: &Interrupt) -> Self {
        InterruptingWriter {
            buf: Vec::new(),
            marker,
            interrupt: interrupt.clone(),
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.buf.clone()).unwrap()
    }
}

impl Write for InterruptingWriter {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(data);
        if String::from_utf8_lossy(&self.buf).contains(self.marker) {
            self.interrupt.trigger();
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Leanne Graham, as served by jsonplaceholder (trimmed).
pub const LEANNE: &str = r#"{"id":1,"name":"Leanne Graham","email":"Sincere@april.biz","address":{"city":"Gwenborough"}}"#;

/// `count` posts for user 1 titled `post 1`, `post 2`, ...
pub fn posts_json(count: usize) -> String {
    let posts: Vec<String> = (1..=count)
        .map(|i| format!(r#"{{"userId":1,"id":{i},"title":"post {i}","body":"..."}}"#))
        .collect();
    format!("[{}]", posts.join(","))
}
