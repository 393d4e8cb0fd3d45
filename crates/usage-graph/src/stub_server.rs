//! Local HTTP server answering with canned responses, one per connection.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

pub struct StubServer {
    base_url: String,
    handle: JoinHandle<Vec<String>>,
}

impl StubServer {
    /// Serve `responses` as `(status, body)` pairs, in order.
    pub fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

        let handle = thread::spawn(move || {
            let mut requests = Vec::new();
            for (status, body) in responses {
                let (stream, _) = listener.accept().expect("accept connection");
                let mut reader = BufReader::new(stream);

                let mut request_line = String::new();
                reader.read_line(&mut request_line).expect("read request line");
                loop {
                    let mut header = String::new();
                    let read = reader.read_line(&mut header).expect("read header");
                    if read == 0 || header == "\r\n" {
                        break;
                    }
                }
                requests.push(request_line.trim_end().to_string());

                let mut stream = reader.into_inner();
                write!(
                    stream,
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                )
                .expect("write response");
                stream.flush().expect("flush response");
            }
            requests
        });

        Self { base_url, handle }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Wait until every response has been served; returns the request lines.
    pub fn requests(self) -> Vec<String> {
        self.handle.join().expect("stub server thread")
    }
}
