use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// A throwaway HTTP server answering each connection with the next canned
/// response, in order.
pub struct FixtureServer {
    pub url: String,
    request_lines: Arc<Mutex<Vec<String>>>,
}

impl FixtureServer {
    pub fn start(responses: Vec<(u16, String)>) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let address = listener.local_addr()?;
        let request_lines = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&request_lines);

        thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let line = read_request_line(&mut stream);
                if let Ok(mut lines) = captured.lock() {
                    lines.push(line);
                }
                write_response(&mut stream, status, &body);
            }
        });

        Ok(Self {
            url: format!("http://{address}/exec"),
            request_lines,
        })
    }

    pub fn request_lines(&self) -> Vec<String> {
        match self.request_lines.lock() {
            Ok(lines) => lines.clone(),
            Err(_) => Vec::new(),
        }
    }
}

fn read_request_line(stream: &mut TcpStream) -> String {
    let mut received = Vec::new();
    let mut buffer = [0u8; 1024];
    while !received.windows(4).any(|window| window == b"\r\n\r\n") {
        match stream.read(&mut buffer) {
            Ok(0) | Err(_) => break,
            Ok(read) => received.extend_from_slice(&buffer[..read]),
        }
    }
    let request = String::from_utf8_lossy(&received).to_string();
    request.lines().next().unwrap_or_default().to_string()
}

fn write_response(stream: &mut TcpStream, status: u16, body: &str) {
    let reason = match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
