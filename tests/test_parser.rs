use hearth::http::parser::{ParseError, parse_request, try_parse_request};
use hearth::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = try_parse_request(req).unwrap();

    assert_eq!(parsed.method(), Some(Method::GET));
    assert_eq!(parsed.start_line.target.path, "/");
    assert_eq!(parsed.start_line.target.file_name, "index.html");
    assert_eq!(parsed.start_line.version, "HTTP/1.1");
    assert_eq!(parsed.header("Host"), Some("example.com"));
}

#[test]
fn test_parse_splits_target_at_last_slash() {
    let parsed = parse_request(b"GET /foo/bar.html HTTP/1.1\r\n\r\n");

    assert_eq!(parsed.start_line.target.path, "/foo/");
    assert_eq!(parsed.start_line.target.file_name, "bar.html");
}

#[test]
fn test_parse_target_without_slash() {
    let parsed = parse_request(b"GET style.css HTTP/1.1\r\n\r\n");

    assert_eq!(parsed.start_line.target.path, "/");
    assert_eq!(parsed.start_line.target.file_name, "style.css");
}

#[test]
fn test_parse_start_line_tokens_roundtrip() {
    for (m, t, v) in [
        ("GET", "/a/b/c.js", "HTTP/1.1"),
        ("POST", "/login", "HTTP/1.0"),
        ("BREW", "/pot/", "HTCPCP/1.0"),
    ] {
        let raw = format!("{m} {t} {v}\r\n\r\n");
        let parsed = parse_request(raw.as_bytes());
        let split = t.rfind('/').unwrap() + 1;

        assert_eq!(parsed.start_line.method, m);
        assert_eq!(parsed.start_line.version, v);
        assert_eq!(parsed.start_line.target.path, &t[..split]);
        let expected_file = if t[split..].is_empty() { "index.html" } else { &t[split..] };
        assert_eq!(parsed.start_line.target.file_name, expected_file);
    }
}

#[test]
fn test_parse_malformed_start_line() {
    let result = try_parse_request(b"GET /\r\nHost: x\r\n\r\n");
    assert!(matches!(result, Err(ParseError::MalformedStartLine)));

    let lenient = parse_request(b"GET /\r\nHost: x\r\n\r\n");
    assert!(!lenient.is_valid());
    assert!(lenient.start_line.method.is_empty());
    assert!(lenient.headers.is_empty());
}

#[test]
fn test_parse_empty_buffer() {
    let parsed = parse_request(b"");
    assert!(!parsed.is_valid());
}

#[test]
fn test_parse_header_trimming() {
    let parsed = parse_request(b"GET / HTTP/1.1\r\nX-Test:   value  \r\n\r\n");

    assert_eq!(parsed.header("X-Test"), Some("value"));
}

#[test]
fn test_parse_drops_malformed_header_lines() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\nEmpty:\r\nHost: localhost\r\n\r\n";
    let parsed = parse_request(req);

    assert_eq!(parsed.headers.len(), 1);
    assert_eq!(parsed.header("Host"), Some("localhost"));
    assert_eq!(parsed.header("BrokenHeader"), None);
}

#[test]
fn test_parse_duplicate_headers_keep_order() {
    let req = b"GET / HTTP/1.1\r\nAccept: image/png\r\nAccept: text/html\r\n\r\n";
    let parsed = parse_request(req);

    assert_eq!(parsed.header("Accept"), Some("image/png"));
    let values: Vec<_> = parsed.headers.iter().map(|h| h.value.as_str()).collect();
    assert_eq!(values, vec!["image/png", "text/html"]);
}

#[test]
fn test_parse_json_body() {
    let req = b"POST /register HTTP/1.1\r\nContent-Type: application/json\r\n\r\n{\"username\":\"bob\",\"password\":\"pw\"}";
    let parsed = parse_request(req);

    assert_eq!(parsed.body_str("username"), Some("bob"));
    assert_eq!(parsed.body_str("password"), Some("pw"));
}

#[test]
fn test_parse_invalid_json_body_is_absent() {
    let req = b"POST /login HTTP/1.1\r\nContent-Type: application/json\r\n\r\n{not json";
    let parsed = parse_request(req);

    assert!(parsed.is_valid());
    assert!(parsed.body.is_none());
}

#[test]
fn test_parse_headers_without_terminator() {
    let parsed = parse_request(b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n");

    assert!(parsed.is_valid());
    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert!(parsed.body.is_none());
}

#[test]
fn test_parse_truncated_request_does_not_panic() {
    let full = b"POST /register HTTP/1.1\r\nContent-Type: application/json\r\n\r\n{\"username\":\"bob\",\"password\":\"pw\"}";
    for cut in 0..full.len() {
        let _ = parse_request(&full[..cut]);
    }

    let truncated = parse_request(&full[..full.len() - 5]);
    assert!(truncated.body.is_none());
}

#[test]
fn test_parse_is_idempotent() {
    let req = b"GET /css/site.css HTTP/1.1\r\nAccept: text/css\r\nHost: a\r\n\r\n";

    assert_eq!(parse_request(req), parse_request(req));
}
