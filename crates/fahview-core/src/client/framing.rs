//! Response framing for a protocol without length prefixes.
//!
//! A response is complete as soon as the accumulated text satisfies any of:
//!
//! - it contains the prompt on a fresh line, `"\n> "`;
//! - it is exactly the bare prompt, `"> "`;
//! - it contains a `"---"` document terminator that is not the start of a
//!   `"---\nPyON"` separator between two documents.
//!
//! These rules must stay byte-for-byte what the daemon's own viewer uses,
//! including the fact that a terminator at the very end of a chunk counts as
//! complete even if a separator was about to follow.

use super::error::ClientError;

const PROMPT: &[u8] = b"> ";
const PROMPT_ON_NEW_LINE: &[u8] = b"\n> ";
const DOCUMENT_TERMINATOR: &[u8] = b"---";
const DOCUMENT_SEPARATOR: &[u8] = b"---\nPyON";

/// Returns `true` if `accumulated` holds a complete response.
pub fn is_complete(accumulated: &[u8]) -> bool {
    accumulated == PROMPT
        || contains(accumulated, PROMPT_ON_NEW_LINE)
        || has_final_terminator(accumulated)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn has_final_terminator(text: &[u8]) -> bool {
    text.windows(DOCUMENT_TERMINATOR.len())
        .enumerate()
        .filter(|(_, w)| *w == DOCUMENT_TERMINATOR)
        .any(|(pos, _)| !text[pos..].starts_with(DOCUMENT_SEPARATOR))
}

/// Accumulates received chunks until they form a complete response.
#[derive(Debug, Default)]
pub struct ResponseFramer {
    buffer: Vec<u8>,
}

impl ResponseFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk and reports whether the response is now complete.
    pub fn push(&mut self, chunk: &[u8]) -> bool {
        self.buffer.extend_from_slice(chunk);
        is_complete(&self.buffer)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consumes the framer and returns the accumulated text.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEncoding`] if the bytes are not UTF-8.
    pub fn into_text(self) -> Result<String, ClientError> {
        String::from_utf8(self.buffer).map_err(|_| ClientError::InvalidEncoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_prompt_is_complete() {
        assert!(is_complete(b"> "));
    }

    #[test]
    fn prompt_must_be_exact_or_on_new_line() {
        assert!(!is_complete(b">"));
        assert!(!is_complete(b"text> "));
        assert!(!is_complete(b" > "));
        assert!(is_complete(b"Welcome\n> "));
    }

    #[test]
    fn document_terminator_completes_response() {
        assert!(is_complete(b"PyON 1 slots\n[]\n---\n"));
        assert!(is_complete(b"PyON 1 slots\n[]\n---"));
    }

    #[test]
    fn separator_between_documents_does_not_complete_response() {
        assert!(!is_complete(
            b"PyON 1 topology\n{\n}\n---\nPyON 1 positions\n[\n"
        ));
    }

    #[test]
    fn terminator_after_separator_completes_response() {
        assert!(is_complete(
            b"PyON 1 topology\n{\n}\n---\nPyON 1 positions\n[\n]\n---\n"
        ));
    }

    #[test]
    fn partial_text_is_incomplete() {
        assert!(!is_complete(b""));
        assert!(!is_complete(b"partial"));
        assert!(!is_complete(b"--"));
        assert!(!is_complete(b"-0.96, 1.7"));
    }

    #[test]
    fn framer_completes_after_second_chunk() {
        let mut framer = ResponseFramer::new();
        assert!(!framer.push(b"partial"));
        assert!(framer.push(b"rest\n> "));
        assert_eq!(framer.into_text().unwrap(), "partialrest\n> ");
    }

    #[test]
    fn framer_detects_sentinel_split_across_chunks() {
        let mut framer = ResponseFramer::new();
        assert!(!framer.push(b"OK\n"));
        assert!(!framer.push(b">"));
        assert!(framer.push(b" "));
        assert_eq!(framer.len(), 5);
    }

    #[test]
    fn framer_rejects_invalid_utf8() {
        let mut framer = ResponseFramer::new();
        framer.push(&[0xff, 0xfe]);
        assert!(!framer.is_empty());
        assert!(matches!(
            framer.into_text(),
            Err(ClientError::InvalidEncoding)
        ));
    }
}
