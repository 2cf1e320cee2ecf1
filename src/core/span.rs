//! Span - offset and length into the document buffer
//!
//! Zero-copy reference to a portion of the decoded buffer.
//! Used for element names, attribute names/values, and text content.

/// A span referencing a portion of the document buffer.
///
/// Size: 8 bytes. Buffers are capped at `u32::MAX` bytes so every span fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Span {
    /// Byte offset into the buffer
    pub offset: u32,
    /// Length in bytes
    pub len: u32,
}

impl Span {
    #[inline]
    pub const fn new(offset: u32, len: u32) -> Self {
        Self { offset, len }
    }

    /// Span covering `start..end` (byte positions)
    #[inline]
    pub fn between(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self::new(start as u32, (end - start) as u32)
    }

    #[inline]
    pub const fn empty() -> Self {
        Self { offset: 0, len: 0 }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn start(&self) -> usize {
        self.offset as usize
    }

    /// End offset (exclusive)
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset as usize + self.len as usize
    }

    /// Extract the byte slice from the buffer
    #[inline]
    pub fn slice<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        let start = self.start();
        let end = self.end();
        if end <= input.len() {
            &input[start..end]
        } else {
            &[]
        }
    }

    /// Extract as UTF-8 string from the buffer
    #[inline]
    pub fn as_str<'a>(&self, input: &'a [u8]) -> Option<&'a str> {
        std::str::from_utf8(self.slice(input)).ok()
    }
}
