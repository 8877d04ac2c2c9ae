//! Append-only text buffer for the streamed report.

/// Growing buffer that collects decoded fragments in arrival order.
///
/// Backed by a single `String`, so `append` costs amortized O(len(fragment))
/// regardless of how much text is already buffered; history is never
/// re-concatenated.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IncrementalAccumulator {
    buffer: String,
}

impl IncrementalAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `fragment` and returns the full buffer.
    pub fn append(&mut self, fragment: &str) -> &str {
        self.buffer.push_str(fragment);
        &self.buffer
    }

    /// Current buffer contents.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drops all buffered text. Only a new submission does this.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}
