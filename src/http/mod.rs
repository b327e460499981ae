//! HTTP protocol implementation.
//!
//! One request is served per connection; the connection is closed once the
//! response has been written.
//!
//! # Architecture
//!
//! - **`headers`**: Ordered header table with first-match lookup
//! - **`request`**: Start line, target and request types
//! - **`parser`**: Turns a raw byte buffer into an `HttpRequest`
//! - **`mime`**: `Accept` parsing and content negotiation
//! - **`dispatcher`**: Routes GET to static files and POST to the account API
//! - **`static_files`**: Serves files from the resource root
//! - **`response`**: Status codes, canned responses and a builder
//! - **`writer`**: Serializes a response and writes it out completely
//! - **`connection`**: The per-connection state machine
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read until complete, EOF or buffer full
//!        └──────┬──────┘
//!               │ Bytes received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Parse and dispatch
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send head, then body
//!        └──────┬───────────┘
//!               │
//!               ▼
//!            Closed
//! ```

pub mod connection;
pub mod dispatcher;
pub mod headers;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod static_files;
pub mod writer;
