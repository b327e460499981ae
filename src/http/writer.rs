use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Status line, headers and the blank separator line.
pub fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    buf.extend_from_slice(b"\r\n");
    buf
}

/// Writes a response as two parts, the head and then the body, each looped
/// until every byte has been accepted.
pub struct ResponseWriter {
    head: Vec<u8>,
    body: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        Self {
            head: serialize_head(&response),
            body: response.body,
            written: 0,
        }
    }

    pub fn total_len(&self) -> usize {
        self.head.len() + self.body.len()
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.total_len() {
            let chunk = if self.written < self.head.len() {
                &self.head[self.written..]
            } else {
                &self.body[self.written - self.head.len()..]
            };

            let n = stream.write(chunk).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::StatusCode;

    #[tokio::test]
    async fn writes_canned_response_byte_for_byte() {
        let mut out: Vec<u8> = Vec::new();
        let mut writer = ResponseWriter::new(Response::canned(StatusCode::NotFound));

        writer.write_to_stream(&mut out).await.unwrap();

        assert_eq!(
            out,
            b"HTTP/1.1 404 Not Found\r\n\
              Content-Type: text/plain\r\n\
              Content-Length: 13\r\n\
              \r\n\
              404 Not Found"
                .to_vec()
        );
    }
}
