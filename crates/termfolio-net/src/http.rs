//! Minimal HTTP/1.1 POST over any `Read + Write` stream.

use std::io::{self, Read, Write};

use termfolio_types::error::{Result, TermfolioError};

/// Maximum response size we bother reading.
const MAX_RESPONSE_SIZE: usize = 64 * 1024;

/// An `https://host[:port]/path` endpoint, split into connection parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl Endpoint {
    /// Parse an HTTPS URL. Other schemes are rejected.
    pub fn parse(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix("https://")
            .ok_or_else(|| TermfolioError::Net(format!("not an https URL: {url}")))?;
        let (authority, path) = match rest.find('/') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, "/"),
        };
        let (host, port) = match authority.rsplit_once(':') {
            Some((h, p)) => {
                let port = p
                    .parse()
                    .map_err(|_| TermfolioError::Net(format!("bad port in {url}")))?;
                (h, port)
            },
            None => (authority, 443),
        };
        if host.is_empty() {
            return Err(TermfolioError::Net(format!("missing host in {url}")));
        }
        Ok(Self {
            host: host.to_string(),
            port,
            path: path.to_string(),
        })
    }

    fn host_header(&self) -> String {
        if self.port == 443 {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Serialize a JSON POST request.
pub fn build_post(endpoint: &Endpoint, body: &str) -> String {
    format!(
        "POST {path} HTTP/1.1\r\n\
         Host: {host}\r\n\
         User-Agent: termfolio/{version}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {len}\r\n\
         Connection: close\r\n\
         \r\n\
         {body}",
        path = endpoint.path,
        host = endpoint.host_header(),
        version = env!("CARGO_PKG_VERSION"),
        len = body.len(),
    )
}

/// Send `request` and return the response status code.
pub fn exchange(stream: &mut (impl Read + Write), request: &str) -> Result<u16> {
    stream
        .write_all(request.as_bytes())
        .map_err(|e| TermfolioError::Net(format!("send request: {e}")))?;
    stream
        .flush()
        .map_err(|e| TermfolioError::Net(format!("flush request: {e}")))?;
    let raw = read_response(stream)?;
    parse_status(&raw)
}

/// Read until EOF, timeout, or the size cap.
fn read_response(stream: &mut impl Read) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 4096];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.len() >= MAX_RESPONSE_SIZE {
                    break;
                }
            },
            Err(e)
                if e.kind() == io::ErrorKind::WouldBlock || e.kind() == io::ErrorKind::TimedOut =>
            {
                break;
            },
            // Servers that close without close_notify still sent a full reply.
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof && !buf.is_empty() => break,
            Err(e) => return Err(TermfolioError::Net(format!("read response: {e}"))),
        }
    }
    Ok(buf)
}

/// Extract the status code from the first line of a raw response.
pub fn parse_status(raw: &[u8]) -> Result<u16> {
    let line_end = raw
        .windows(2)
        .position(|w| w == b"\r\n")
        .unwrap_or(raw.len());
    let line = std::str::from_utf8(&raw[..line_end])
        .map_err(|_| TermfolioError::Net("non-UTF-8 status line".to_string()))?;
    if line.is_empty() {
        return Err(TermfolioError::Net("empty response".to_string()));
    }
    let mut parts = line.splitn(3, ' ');
    let version = parts.next().unwrap_or("");
    if !version.starts_with("HTTP/") {
        return Err(TermfolioError::Net(format!("bad status line: {line}")));
    }
    parts
        .next()
        .and_then(|code| code.parse().ok())
        .ok_or_else(|| TermfolioError::Net(format!("bad status code in: {line}")))
}
