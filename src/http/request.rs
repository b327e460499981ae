use std::fmt;

use serde_json::Value;

use crate::http::headers::HeaderTable;

/// File name used when the request target ends with `/`.
pub const DEFAULT_FILE_NAME: &str = "index.html";

/// HTTP request methods the dispatcher serves.
///
/// Anything else is answered with 501 Not Implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Submit account data
    POST,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive, typically uppercase)
    ///
    /// # Returns
    ///
    /// `Some(Method)` for GET or POST, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use hearth::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("PUT"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            _ => None,
        }
    }
}

/// A request URI split into its directory and file name.
///
/// `path` always ends with `/` and `file_name` is never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Target {
    pub path: String,
    pub file_name: String,
}

impl Target {
    /// Splits `uri` at its last `/`.
    ///
    /// ```
    /// # use hearth::http::request::Target;
    /// let t = Target::from_uri("/foo/bar.html");
    /// assert_eq!(t.path, "/foo/");
    /// assert_eq!(t.file_name, "bar.html");
    /// ```
    pub fn from_uri(uri: &str) -> Self {
        let (path, file_name) = match uri.rfind('/') {
            Some(idx) => (&uri[..=idx], &uri[idx + 1..]),
            None => ("/", uri),
        };

        let file_name = if file_name.is_empty() {
            DEFAULT_FILE_NAME
        } else {
            file_name
        };

        Self {
            path: path.to_string(),
            file_name: file_name.to_string(),
        }
    }
}

/// The first line of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartLine {
    pub method: String,
    pub target: Target,
    pub version: String,
}

/// Represents a parsed HTTP request from a client.
///
/// A request whose start line could not be parsed stays in its default,
/// empty state; check [`HttpRequest::is_valid`] before acting on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpRequest {
    pub start_line: StartLine,
    pub headers: HeaderTable,
    /// JSON payload, if one followed the headers and parsed cleanly.
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Retrieves the first header named exactly `key`.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// The recognised method, or `None` for an unknown or missing one.
    pub fn method(&self) -> Option<Method> {
        Method::from_str(&self.start_line.method)
    }

    pub fn target(&self) -> &Target {
        &self.start_line.target
    }

    /// `false` when the start line failed to parse.
    pub fn is_valid(&self) -> bool {
        !self.start_line.method.is_empty()
            && !self.start_line.version.is_empty()
            && !self.start_line.target.file_name.is_empty()
    }

    /// Looks up a string field of the JSON body.
    pub fn body_str(&self, field: &str) -> Option<&str> {
        self.body.as_ref()?.get(field)?.as_str()
    }
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sl = &self.start_line;
        writeln!(
            f,
            "StartLine=[Method: {}, Target=[Path: {}, Filename: {}], Version: {}]",
            sl.method, sl.target.path, sl.target.file_name, sl.version
        )?;
        writeln!(f, "Headers={}", self.headers)?;
        match &self.body {
            Some(body) => write!(f, "Body={body}"),
            None => write!(f, "Body=NULL"),
        }
    }
}

/// Assembles an `HttpRequest` without going through raw bytes.
///
/// Only the test suites use this; the server always parses.
pub struct RequestBuilder {
    method: Option<String>,
    target: Option<String>,
    version: Option<String>,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            target: None,
            version: None,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn target(mut self, uri: impl Into<String>) -> Self {
        self.target = Some(uri.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn build(self) -> Result<HttpRequest, &'static str> {
        let uri = self.target.ok_or("target missing")?;
        let mut headers = HeaderTable::new();
        for (key, value) in self.headers {
            headers
                .add(key, value)
                .map_err(|_| "header table out of memory")?;
        }

        Ok(HttpRequest {
            start_line: StartLine {
                method: self.method.ok_or("method missing")?,
                target: Target::from_uri(&uri),
                version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            },
            headers,
            body: self.body,
        })
    }
}
