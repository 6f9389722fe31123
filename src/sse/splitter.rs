//! Chunk-boundary-safe frame reassembly
//!
//! The response body arrives in chunks of arbitrary length; an SSE frame may
//! be split anywhere, including in the middle of the blank-line delimiter.
//! `FrameSplitter` accumulates chunks and emits only complete frames, in
//! arrival order.

/// Stateful accumulator that turns a chunk sequence into complete frames.
///
/// The only state is the unconsumed trailing fragment from the previous
/// chunk. A frame is the text between two blank-line delimiters (`\n\n`,
/// with `\r\n\r\n` tolerated for CRLF backends); a frame is never split
/// across two emissions, and an incomplete tail is held, not emitted.
#[derive(Debug, Default)]
pub struct FrameSplitter {
    /// Unconsumed text after the last complete delimiter seen.
    tail: String,
}

impl FrameSplitter {
    /// Create a new frame splitter
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning every frame completed by it.
    ///
    /// An empty chunk is a no-op. A chunk containing several delimiters
    /// yields several frames from this single call.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        if chunk.is_empty() {
            return Vec::new();
        }

        self.tail.push_str(chunk);

        let mut frames = Vec::new();
        while let Some((start, len)) = find_delimiter(&self.tail) {
            let frame = self.tail[..start].to_string();
            self.tail.drain(..start + len);
            frames.push(frame);
        }
        frames
    }

    /// Signal end-of-stream.
    ///
    /// A non-empty held fragment is an incomplete frame from a truncated
    /// transmission; it must not be decoded as valid data. It is discarded
    /// and returned so the caller can record a truncation diagnostic.
    pub fn finish(&mut self) -> Option<String> {
        if self.tail.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.tail))
        }
    }

    /// Length of the currently held fragment.
    pub fn pending_len(&self) -> usize {
        self.tail.len()
    }
}

/// Find the earliest blank-line delimiter, returning (byte offset, length).
fn find_delimiter(text: &str) -> Option<(usize, usize)> {
    let lf = text.find("\n\n").map(|i| (i, 2));
    let crlf = text.find("\r\n\r\n").map(|i| (i, 4));
    match (lf, crlf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}
