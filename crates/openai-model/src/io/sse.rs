use super::{Chunks, ChunksError};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    ChunksError(ChunksError),
    InvalidPayload,
}

/// A type for reading server-sent events from a chunk stream.
pub struct Sse {
    buf: String,
    // Bytes of a multi-byte character split across two chunks.
    pending: Vec<u8>,
    chunks: Chunks,
}

impl Sse {
    #[inline]
    pub fn new(chunks: Chunks) -> Self {
        Self {
            buf: String::new(),
            pending: Vec::new(),
            chunks,
        }
    }

    /// Returns the `data` payload of the next event, or `None` once the
    /// stream is exhausted.
    pub async fn next_event(&mut self) -> Result<Option<String>, Error> {
        loop {
            // Drain complete events before reading more data.
            if let Some(event) = self.try_parse_event()? {
                return Ok(Some(event));
            }

            let Some(bytes) =
                self.chunks.next_chunk().await.map_err(Error::ChunksError)?
            else {
                return Ok(None);
            };
            self.pending.extend_from_slice(&bytes);
            match str::from_utf8(&self.pending) {
                Ok(s) => {
                    self.buf.push_str(s);
                    self.pending.clear();
                }
                Err(err) if err.error_len().is_none() => {
                    // Incomplete trailing character, keep it for later.
                    let valid = err.valid_up_to();
                    let head = str::from_utf8(&self.pending[..valid])
                        .map_err(|_| Error::InvalidPayload)?;
                    self.buf.push_str(head);
                    self.pending.drain(..valid);
                }
                Err(_) => return Err(Error::InvalidPayload),
            }
        }
    }

    fn try_parse_event(&mut self) -> Result<Option<String>, Error> {
        loop {
            // For `end-of-line`, we only handle line feed. And for event, we
            // only handle the `data` field and comments.
            //
            // event         = *( comment / field ) end-of-line
            // comment       = colon *any-char end-of-line
            // field         = 1*name-char [ colon [ space ] *any-char ] end-of-line
            let Some(eol_idx) = self.buf.find("\n\n") else {
                return Ok(None);
            };

            let mut data: Option<String> = None;
            for line in self.buf[..eol_idx].lines() {
                if line.is_empty() || line.starts_with(':') {
                    continue;
                }
                let (name, value) = line.split_once(':').unwrap_or((line, ""));
                if name != "data" {
                    return Err(Error::InvalidPayload);
                }
                let value = value.strip_prefix(' ').unwrap_or(value);
                match &mut data {
                    Some(data) => {
                        data.push('\n');
                        data.push_str(value);
                    }
                    None => data = Some(value.to_owned()),
                }
            }

            // Consume the bytes from the buffer.
            self.buf.drain(0..eol_idx + 2);

            // Comment-only events carry nothing, move on to the next one.
            if let Some(data) = data {
                return Ok(Some(data));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[tokio::test]
    async fn test_normal_events() {
        let chunks = Chunks::from_vec_deque(
            vec![
                Bytes::from_static(b"data: hello\n\n"),
                Bytes::from_static(b"data: bye\n\n"),
            ]
            .into(),
        );
        let mut sse = Sse::new(chunks);
        assert_eq!(sse.next_event().await.unwrap().unwrap(), "hello");
        assert_eq!(sse.next_event().await.unwrap().unwrap(), "bye");
        assert_eq!(sse.next_event().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_quirk_streaming() {
        let chunks = Chunks::from_vec_deque(
            vec![
                Bytes::from_static(b"data:"),
                Bytes::from_static(b" hello\n"),
                Bytes::from_static(b"\n"),
            ]
            .into(),
        );
        let mut sse = Sse::new(chunks);
        assert_eq!(sse.next_event().await.unwrap().unwrap(), "hello");
        assert_eq!(sse.next_event().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_colon_in_payload() {
        let chunks = Chunks::from_vec_deque(
            vec![Bytes::from_static(b"data: {\"content\": \"a: b\"}\n\n")]
                .into(),
        );
        let mut sse = Sse::new(chunks);
        assert_eq!(
            sse.next_event().await.unwrap().unwrap(),
            "{\"content\": \"a: b\"}"
        );
    }

    #[tokio::test]
    async fn test_split_utf8_and_comments() {
        let text = "data: caf\u{e9}\n\n".as_bytes();
        // Split inside the two-byte encoding of the last character.
        let split = text.len() - 3;
        let chunks = Chunks::from_vec_deque(
            vec![
                Bytes::from_static(b": keep-alive\n\n"),
                Bytes::copy_from_slice(&text[..split]),
                Bytes::copy_from_slice(&text[split..]),
            ]
            .into(),
        );
        let mut sse = Sse::new(chunks);
        assert_eq!(sse.next_event().await.unwrap().unwrap(), "caf\u{e9}");
        assert_eq!(sse.next_event().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_data() {
        let chunks = Chunks::from_vec_deque(
            vec![Bytes::from_static(b"xxxxxx: 1\n\n")].into(),
        );
        let mut sse = Sse::new(chunks);
        assert_eq!(sse.next_event().await.unwrap_err(), Error::InvalidPayload);

        let chunks = Chunks::from_vec_deque(
            vec![Bytes::from_static(b"xxxxxx\n")].into(),
        );
        let mut sse = Sse::new(chunks);
        assert_eq!(sse.next_event().await.unwrap(), None);

        let chunks = Chunks::from_vec_deque(
            vec![Bytes::from_static(&[b'd', b'a', 0xff, b'\n', b'\n'])].into(),
        );
        let mut sse = Sse::new(chunks);
        assert_eq!(sse.next_event().await.unwrap_err(), Error::InvalidPayload);
    }
}
