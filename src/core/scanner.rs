//! SIMD-accelerated XML scanning using memchr
//!
//! Uses memchr crate for fast byte searching with SIMD acceleration:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)
//!
//! The scanner is read-only. The decoder creates one over the current buffer
//! contents whenever it needs to look ahead, then rewrites bytes itself.

use memchr::{memchr, memchr2, memmem};

pub const CDATA_OPEN: &[u8] = b"<![CDATA[";
pub const CDATA_CLOSE: &[u8] = b"]]>";
pub const COMMENT_OPEN: &[u8] = b"<!--";
pub const COMMENT_CLOSE: &[u8] = b"-->";

/// Scanner for XML delimiter detection
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at `pos`
    #[inline]
    pub fn at(input: &'a [u8], pos: usize) -> Self {
        Scanner {
            input,
            pos: pos.min(input.len()),
        }
    }

    /// Check if input starts with a byte sequence at current position
    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.input[self.pos..].starts_with(needle)
    }

    /// Find next '<' (tag start) using SIMD
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        memchr(b'<', &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Find next occurrence of a byte sequence
    #[inline]
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(&self.input[self.pos..], needle).map(|i| self.pos + i)
    }

    /// Find the `]]>` closing a CDATA section
    #[inline]
    pub fn find_cdata_end(&self) -> Option<usize> {
        self.find(CDATA_CLOSE)
    }

    /// Find the `-->` closing a comment
    #[inline]
    pub fn find_comment_end(&self) -> Option<usize> {
        self.find(COMMENT_CLOSE)
    }

    /// Find the '>' terminating the tag whose '<' precedes the current position.
    ///
    /// CDATA sections inside the tag are skipped, so a '>' inside an attribute's
    /// `<![CDATA[...]]>` does not end the tag. A stray '<' is treated as a
    /// literal byte.
    pub fn find_tag_end(&self) -> Option<usize> {
        let mut pos = self.pos;
        loop {
            let found = memchr2(b'<', b'>', &self.input[pos..])? + pos;
            if self.input[found] == b'>' {
                return Some(found);
            }
            if self.input[found..].starts_with(CDATA_OPEN) {
                let close = Scanner::at(self.input, found + CDATA_OPEN.len()).find_cdata_end()?;
                pos = close + CDATA_CLOSE.len();
            } else {
                pos = found + 1;
            }
        }
    }

    /// Find the next '<' that opens a real tag, stepping over CDATA sections
    /// and comments that sit in running text.
    ///
    /// Returns `None` when no such tag exists or a section along the way is
    /// unterminated.
    pub fn find_markup_boundary(&self) -> Option<usize> {
        let mut pos = self.pos;
        loop {
            let found = memchr(b'<', &self.input[pos..])? + pos;
            let rest = &self.input[found..];
            if rest.starts_with(CDATA_OPEN) {
                let close = Scanner::at(self.input, found + CDATA_OPEN.len()).find_cdata_end()?;
                pos = close + CDATA_CLOSE.len();
            } else if rest.starts_with(COMMENT_OPEN) {
                let close =
                    Scanner::at(self.input, found + COMMENT_OPEN.len()).find_comment_end()?;
                pos = close + COMMENT_CLOSE.len();
            } else {
                return Some(found);
            }
        }
    }

    /// Find the end of an element name: first whitespace or '/' before `limit`
    pub fn find_name_end(&self, limit: usize) -> usize {
        let limit = limit.min(self.input.len());
        self.input[self.pos..limit]
            .iter()
            .position(|&b| is_whitespace(b) || b == b'/')
            .map_or(limit, |i| self.pos + i)
    }
}

/// XML whitespace: space, tab, newline, carriage return
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Trim XML whitespace from both ends of `start..end`, returning the new bounds
pub fn trim_range(input: &[u8], mut start: usize, mut end: usize) -> (usize, usize) {
    while start < end && is_whitespace(input[start]) {
        start += 1;
    }
    while end > start && is_whitespace(input[end - 1]) {
        end -= 1;
    }
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_tag_start() {
        let scanner = Scanner::at(b"hello <world>", 0);
        assert_eq!(scanner.find_tag_start(), Some(6));
    }

    #[test]
    fn test_find_tag_end_skips_cdata() {
        let input = b"<a v=\"<![CDATA[x>y]]>\">rest";
        let scanner = Scanner::at(input, 1);
        assert_eq!(scanner.find_tag_end(), Some(22));
    }

    #[test]
    fn test_find_tag_end_unterminated() {
        assert_eq!(Scanner::at(b"<a b='1'", 1).find_tag_end(), None);
        assert_eq!(Scanner::at(b"<a v='<![CDATA[>'>", 1).find_tag_end(), None);
    }

    #[test]
    fn test_markup_boundary_skips_sections() {
        let input = b"x<![CDATA[<b>]]>y<!-- <c> -->z</a>";
        let scanner = Scanner::at(input, 0);
        assert_eq!(scanner.find_markup_boundary(), Some(30));
    }

    #[test]
    fn test_find_name_end() {
        let input = b"<item id='1'>";
        assert_eq!(Scanner::at(input, 1).find_name_end(12), 5);
        let input = b"<br/>";
        assert_eq!(Scanner::at(input, 1).find_name_end(4), 3);
        let input = b"<tile>";
        assert_eq!(Scanner::at(input, 1).find_name_end(5), 5);
    }

    #[test]
    fn test_trim_range() {
        let input = b"  \t hi there\n ";
        let (start, end) = trim_range(input, 0, input.len());
        assert_eq!(&input[start..end], b"hi there");
        assert_eq!(trim_range(b"   ", 0, 3), (3, 3));
    }
}
