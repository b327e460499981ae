use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;

use crate::http::dispatcher::Dispatcher;
use crate::http::parser::{parse_request, request_complete};
use crate::http::request::HttpRequest;
use crate::http::writer::ResponseWriter;

/// Serves exactly one request over `stream`, then closes it.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    recv_limit: usize,
    read_timeout: Option<Duration>,
    dispatcher: Dispatcher,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(HttpRequest),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, dispatcher: Dispatcher, recv_limit: usize) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(recv_limit),
            recv_limit,
            read_timeout: None,
            dispatcher,
            state: ConnectionState::Reading,
        }
    }

    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    let raw = self.read_request().await?;
                    if raw.is_empty() {
                        self.state = ConnectionState::Closed;
                        continue;
                    }

                    let request = parse_request(&raw);
                    tracing::debug!(request = %request, "Parsed request");
                    self.state = ConnectionState::Processing(request);
                }

                ConnectionState::Processing(req) => {
                    let response = self.dispatcher.dispatch(req).await;

                    tracing::info!(
                        method = %req.start_line.method,
                        path = %req.start_line.target.path,
                        file = %req.start_line.target.file_name,
                        status = response.status.as_u16(),
                        "Request handled"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(response));
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.stream.shutdown().await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until the request is complete, the peer stops sending, the
    /// receive buffer is full, or the read timeout elapses. The timeout is
    /// one deadline for the whole read phase, not per read. Bytes past the
    /// buffer size are never read.
    pub async fn read_request(&mut self) -> anyhow::Result<Vec<u8>> {
        let mut temp = [0u8; 1024];
        let deadline = self.read_timeout.map(|limit| Instant::now() + limit);

        while self.buffer.len() < self.recv_limit && !request_complete(&self.buffer) {
            let want = temp.len().min(self.recv_limit - self.buffer.len());

            let n = match deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(deadline, self.stream.read(&mut temp[..want])).await {
                        Ok(res) => res?,
                        Err(_) => {
                            tracing::warn!(read = self.buffer.len(), "Timed out reading request");
                            break;
                        }
                    }
                }
                None => self.stream.read(&mut temp[..want]).await?,
            };

            if n == 0 {
                // Client closed its write half
                break;
            }

            self.buffer.extend_from_slice(&temp[..n]);
        }

        if self.buffer.len() >= self.recv_limit && !request_complete(&self.buffer) {
            tracing::warn!(limit = self.recv_limit, "Request truncated at receive buffer size");
        }

        Ok(self.buffer.split().to_vec())
    }
}
