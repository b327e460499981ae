//! Hearth - single-request HTTP/1.1 server
//!
//! Core library: request parsing, content negotiation, dispatch to static
//! files or the account API, and response writing.

pub mod config;
pub mod http;
pub mod server;
pub mod store;
