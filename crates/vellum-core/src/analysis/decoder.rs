//! Stateful UTF-8 decoding of a chunked byte stream.

/// Decodes a sequence of byte chunks into text, one fragment per chunk.
///
/// Chunk boundaries are decided by the transport, so a multi-byte character
/// can arrive split across two chunks. The decoder keeps the incomplete tail
/// of each chunk and prefixes it to the next one, which makes the
/// concatenated output identical to decoding the whole byte sequence at once.
///
/// Malformed sequences are replaced with U+FFFD instead of failing the stream.
#[derive(Debug, Default, Clone)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    /// Creates a decoder with no carried-over bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes one chunk, returning the text that is complete so far.
    ///
    /// The returned fragment may be empty when the chunk only contained the
    /// beginning of a character.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest: &[u8] = &bytes;

        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));

                    match err.error_len() {
                        Some(invalid_len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[invalid_len..];
                        }
                        None => {
                            // Incomplete sequence at the end of the input.
                            self.pending.extend_from_slice(after);
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    /// Flushes the decoder at end of stream.
    ///
    /// A dangling incomplete sequence becomes a single U+FFFD; otherwise the
    /// result is empty.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }

    /// Number of bytes carried over to the next chunk.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
