//! Buffer Owner
//!
//! Holds the single mutable byte region a document is decoded over. The
//! decoder rewrites it in place: NUL bytes at tag and value boundaries, and
//! left shifts that delete CDATA markers (and comments inside text). Shifts
//! only ever touch bytes the decoder has not yet turned into spans.

use super::span::Span;
use crate::error::{Result, XmlError};

pub struct Buffer {
    /// Document bytes followed by one NUL
    bytes: Vec<u8>,
    /// Length of the document data, excluding the trailing NUL
    len: usize,
}

impl Buffer {
    /// Take ownership of `bytes` and append the NUL terminator
    pub fn new(mut bytes: Vec<u8>) -> Result<Self> {
        let len = bytes.len();
        if len >= u32::MAX as usize {
            return Err(XmlError::TooLarge(len));
        }
        bytes.push(0);
        Ok(Buffer { bytes, len })
    }

    /// Document data, excluding the trailing NUL
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn byte(&self, pos: usize) -> Option<u8> {
        self.data().get(pos).copied()
    }

    #[inline]
    pub fn slice(&self, span: Span) -> &[u8] {
        span.slice(self.data())
    }

    /// Overwrite the byte at `pos` with NUL
    #[inline]
    pub fn terminate(&mut self, pos: usize) {
        if pos < self.len {
            self.bytes[pos] = 0;
        }
    }

    /// Delete `start..end` by shifting `end..boundary` left over it.
    ///
    /// The vacated tail just before `boundary` is filled with `pad`, so bytes
    /// at and after `boundary` keep their positions. Returns the number of
    /// bytes removed.
    pub fn splice_out(&mut self, start: usize, end: usize, boundary: usize, pad: u8) -> usize {
        debug_assert!(start <= end && end <= boundary && boundary <= self.len);
        let removed = end - start;
        if removed == 0 {
            return 0;
        }
        self.bytes.copy_within(end..boundary, start);
        self.bytes[boundary - removed..boundary].fill(pad);
        removed
    }
}
