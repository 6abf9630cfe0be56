//! Bounded rendering buffer

use heapless::Vec;

/// Default capacity of the output buffer, terminator included
pub const OUTPUT_CAPACITY: usize = 4096;

/// Returned when an append would exceed the text capacity
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferFull;

/// Append-only store for the textual rendering of the latest translation.
///
/// The last byte of capacity is reserved for the NUL terminator, so at most
/// `N - 1` bytes of text fit.
#[derive(Clone, Debug)]
pub struct OutputBuffer<const N: usize = OUTPUT_CAPACITY> {
    bytes: Vec<u8, N>,
    terminated: bool,
}

impl<const N: usize> OutputBuffer<N> {
    /// Maximum number of text bytes
    pub const TEXT_CAPACITY: usize = N.saturating_sub(1);

    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            terminated: false,
        }
    }

    /// Truncate to empty
    pub fn reset(&mut self) {
        self.bytes.clear();
        self.terminated = false;
    }

    /// Append one byte of text
    pub fn push(&mut self, byte: u8) -> Result<(), BufferFull> {
        self.unterminate();
        if self.bytes.len() >= Self::TEXT_CAPACITY {
            return Err(BufferFull);
        }
        self.bytes.push(byte).map_err(|_| BufferFull)
    }

    /// Append text, stopping at the first byte that does not fit
    pub fn extend_from_slice(&mut self, text: &[u8]) -> Result<(), BufferFull> {
        text.iter().try_for_each(|&byte| self.push(byte))
    }

    /// Write the NUL terminator after the current text
    pub fn terminate(&mut self) {
        if !self.terminated && N > 0 {
            // TEXT_CAPACITY keeps one slot free, so this cannot fail
            self.terminated = self.bytes.push(0).is_ok();
        }
    }

    fn unterminate(&mut self) {
        if self.terminated {
            self.bytes.pop();
            self.terminated = false;
        }
    }

    /// Length of the text, terminator excluded
    pub fn len(&self) -> usize {
        self.bytes.len() - self.terminated as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Total capacity, terminator included
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Rendered text
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    /// Rendered text followed by its terminator, once terminated
    pub fn as_bytes_with_nul(&self) -> Option<&[u8]> {
        self.terminated.then_some(self.bytes.as_slice())
    }

    /// Bounded copy: up to `max_len` bytes of text starting at `offset`,
    /// empty at or past the end
    pub fn read_at(&self, offset: usize, max_len: usize) -> &[u8] {
        let text = self.as_bytes();
        if offset >= text.len() {
            return &[];
        }
        let end = offset + max_len.min(text.len() - offset);
        &text[offset..end]
    }
}

impl<const N: usize> Default for OutputBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
