//! Line codec for the wire.
//!
//! Decoding splits the byte stream on `\n`, strips one trailing `\r`, and
//! rejects oversized lines. Encoding appends CRLF exactly once; command
//! formatting itself never carries a terminator.

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

use crate::error::ClientError;

/// Maximum accepted line length in bytes, terminator excluded.
pub const MAX_LINE_LEN: usize = 8191;

/// CRLF-delimited line codec with a length cap.
#[derive(Debug, Clone, Default)]
pub struct LineCodec {
    // Scan resume point, so partial reads are not re-scanned.
    next_index: usize,
    // After an overflow, bytes are dropped until the next newline.
    discarding: bool,
}

impl LineCodec {
    /// A fresh codec.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ClientError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<String>, ClientError> {
        loop {
            let newline = buf[self.next_index..]
                .iter()
                .position(|b| *b == b'\n')
                .map(|pos| self.next_index + pos);

            if self.discarding {
                match newline {
                    Some(idx) => {
                        buf.advance(idx + 1);
                        self.next_index = 0;
                        self.discarding = false;
                        continue;
                    }
                    None => {
                        buf.advance(buf.len());
                        self.next_index = 0;
                        return Ok(None);
                    }
                }
            }

            return match newline {
                Some(idx) => {
                    if idx > MAX_LINE_LEN {
                        warn!(len = idx, "dropping oversized line");
                        buf.advance(idx + 1);
                        self.next_index = 0;
                        return Err(ClientError::LineTooLong(idx));
                    }

                    let mut line = buf.split_to(idx + 1);
                    self.next_index = 0;

                    line.truncate(line.len() - 1);
                    if line.last() == Some(&b'\r') {
                        line.truncate(line.len() - 1);
                    }

                    String::from_utf8(line.to_vec())
                        .map(Some)
                        .map_err(ClientError::from)
                }
                None => {
                    if buf.len() > MAX_LINE_LEN {
                        let len = buf.len();
                        warn!(len, "dropping oversized line");
                        buf.advance(len);
                        self.next_index = 0;
                        self.discarding = true;
                        return Err(ClientError::LineTooLong(len));
                    }
                    self.next_index = buf.len();
                    Ok(None)
                }
            };
        }
    }
}

impl<T> Encoder<T> for LineCodec
where
    T: AsRef<str>,
{
    type Error = ClientError;

    fn encode(&mut self, line: T, buf: &mut BytesMut) -> Result<(), ClientError> {
        let line = line.as_ref();
        buf.reserve(line.len() + 2);
        buf.put(line.as_bytes());
        buf.put(&b"\r\n"[..]);
        Ok(())
    }
}
