use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::files::StaticHandler;
use crate::http::parser::{find_headers_end, parse_http_request};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;

/// One client connection: a single request, a single response, then close.
pub struct Connection<'a, S> {
    stream: S,
    handler: &'a StaticHandler,
    buffer: BytesMut,
    max_request_bytes: usize,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<'a, S> Connection<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: &'a StaticHandler, max_request_bytes: usize) -> Self {
        Self {
            stream,
            handler,
            buffer: BytesMut::with_capacity(max_request_bytes.min(4096)),
            max_request_bytes,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(req) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    None => {
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(req) => {
                    let response = self.handler.handle(req).await;
                    tracing::debug!(
                        status = response.status.as_u16(),
                        bytes = response.body.len(),
                        "Response ready"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    // No keep-alive: one response per connection
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Buffers bytes until the header block is complete, the peer stops
    /// sending, or the size cap is hit, then parses whatever arrived.
    ///
    /// Returns `None` if the peer closed without sending anything.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        loop {
            if find_headers_end(&self.buffer).is_some() {
                break;
            }

            if self.buffer.len() >= self.max_request_bytes {
                tracing::warn!(
                    limit = self.max_request_bytes,
                    "Request exceeds size limit, truncating"
                );
                break;
            }

            if !self.buffer.is_empty() {
                tracing::debug!(
                    buffered = self.buffer.len(),
                    "Header block incomplete, waiting for more data"
                );
            }

            let remaining = self.max_request_bytes - self.buffer.len();
            let mut chunk = (&mut self.stream).take(remaining as u64);
            let n = chunk.read_buf(&mut self.buffer).await?;

            if n == 0 {
                if self.buffer.is_empty() {
                    // Client closed connection
                    return Ok(None);
                }
                break;
            }
        }

        let request = parse_http_request(&self.buffer);
        self.buffer.clear();

        tracing::debug!(method = %request.method, path = %request.path, "Request received");
        Ok(Some(request))
    }
}
