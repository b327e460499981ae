use thiserror::Error;

use crate::http::headers::{HeaderError, HeaderTable};
use crate::http::request::{HttpRequest, StartLine, Target};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed start line")]
    MalformedStartLine,
    #[error(transparent)]
    Headers(#[from] HeaderError),
}

/// Parses one request, leaving it empty when the start line is malformed.
///
/// Header lines without a colon, or with an empty key or value, are
/// dropped. A body that is not valid JSON is treated as absent.
pub fn parse_request(buf: &[u8]) -> HttpRequest {
    match try_parse_request(buf) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unparseable request");
            HttpRequest::default()
        }
    }
}

pub fn try_parse_request(buf: &[u8]) -> Result<HttpRequest, ParseError> {
    let (head, body_bytes) = match find_headers_end(buf) {
        Some(end) => (&buf[..end], Some(&buf[end + 4..])),
        None => (buf, None),
    };

    let head = String::from_utf8_lossy(head);
    let mut lines = head.split("\r\n");

    let start_line = parse_start_line(lines.next().unwrap_or_default())?;

    let mut headers = HeaderTable::new();
    for line in lines {
        if line.is_empty() {
            break;
        }

        match parse_header_line(line) {
            Some((key, value)) => headers.add(key, value)?,
            None => tracing::debug!(line, "Dropping malformed header line"),
        }
    }

    let body = body_bytes
        .filter(|b| !b.is_empty())
        .and_then(|b| match serde_json::from_slice(b) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "Request body is not valid JSON");
                None
            }
        });

    Ok(HttpRequest {
        start_line,
        headers,
        body,
    })
}

fn parse_start_line(line: &str) -> Result<StartLine, ParseError> {
    let mut parts = line.split(' ').filter(|p| !p.is_empty());

    let method = parts.next().ok_or(ParseError::MalformedStartLine)?;
    let target = parts.next().ok_or(ParseError::MalformedStartLine)?;
    let version = parts.next().ok_or(ParseError::MalformedStartLine)?;

    Ok(StartLine {
        method: method.to_string(),
        target: Target::from_uri(target),
        version: version.to_string(),
    })
}

fn parse_header_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim_end();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Whether `buf` holds a whole request: the end-of-headers marker plus as
/// many body bytes as a `Content-Length` header announces.
pub fn request_complete(buf: &[u8]) -> bool {
    let Some(end) = find_headers_end(buf) else {
        return false;
    };

    let head = String::from_utf8_lossy(&buf[..end]);
    let content_length = head
        .split("\r\n")
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("Content-Length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    buf.len() - (end + 4) >= content_length
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = try_parse_request(req).unwrap();

        assert_eq!(parsed.start_line.target.path, "/");
        assert_eq!(parsed.start_line.target.file_name, "index.html");
        assert_eq!(parsed.header("Host"), Some("example.com"));
        assert!(parsed.body.is_none());
    }

    #[test]
    fn header_line_trimming() {
        assert_eq!(parse_header_line("X-Test:   value  "), Some(("X-Test", "value")));
        assert_eq!(parse_header_line("Key :v"), Some(("Key", "v")));
        assert_eq!(parse_header_line("NoColon"), None);
        assert_eq!(parse_header_line(": value"), None);
        assert_eq!(parse_header_line("Empty:   "), None);
    }

    #[test]
    fn completeness_waits_for_body() {
        let head = b"POST /login HTTP/1.1\r\nContent-Length: 4\r\n\r\n";
        assert!(!request_complete(head));

        let mut full = head.to_vec();
        full.extend_from_slice(b"{}  ");
        assert!(request_complete(&full));
        assert!(!request_complete(b"GET / HTTP/1.1\r\n"));
    }
}
