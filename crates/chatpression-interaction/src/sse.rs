//! Incremental decoder for the chat endpoint's `text/event-stream` body.
//!
//! Network chunks may end anywhere, including inside a line or inside a
//! multi-byte UTF-8 sequence. The decoder buffers raw bytes and only decodes
//! complete lines.

const DATA_PREFIX: &str = "data: ";
const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// One text chunk of the reply.
    Token(String),
    /// The server finished the reply.
    Done,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one network chunk and returns the events of every line it
    /// completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(event) = parse_line(&line[..pos]) {
                events.push(event);
            }
        }
        events
    }

    /// Number of buffered bytes of an unfinished line.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

fn parse_line(raw: &[u8]) -> Option<SseEvent> {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    let line = String::from_utf8_lossy(raw);
    let data = line.strip_prefix(DATA_PREFIX)?;
    if data == DONE_MARKER {
        Some(SseEvent::Done)
    } else {
        Some(SseEvent::Token(data.to_string()))
    }
}
