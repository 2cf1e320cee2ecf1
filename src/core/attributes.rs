//! XML Attribute Scanning
//!
//! Scans the attribute area of an opening tag (the bytes between the element
//! name and the tag terminator) in place. Names and values are NUL-terminated
//! in the buffer and CDATA markers inside values are stripped by shifting the
//! rest of the value left.

use super::buffer::Buffer;
use super::scanner::{is_whitespace, Scanner, CDATA_CLOSE, CDATA_OPEN};
use super::span::Span;

/// Attribute scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrState {
    /// Skipping whitespace before a name
    NameStart,
    /// Inside a name, waiting for whitespace or '='
    NameEnd,
    /// Waiting for the opening quote
    ValueStart,
    /// Inside a quoted value, waiting for the matching quote
    ValueEnd,
    /// Inside a CDATA section within a value
    CDataEnd,
}

/// Scan `start..end` of `buf` for `name="value"` pairs.
///
/// `on_attribute` is called once per completed pair, in document order.
/// Incomplete pairs (no value, unmatched quote) are dropped silently.
pub fn scan_attributes<F>(buf: &mut Buffer, start: usize, end: usize, mut on_attribute: F)
where
    F: FnMut(Span, Span),
{
    let end = end.min(buf.len());
    let mut state = AttrState::NameStart;
    let mut name_start = start;
    let mut name_end = start;
    let mut value_start = start;
    let mut quote = b'"';
    let mut pos = start;

    while pos < end {
        let b = buf.data()[pos];
        match state {
            AttrState::NameStart => {
                if !is_whitespace(b) {
                    name_start = pos;
                    state = AttrState::NameEnd;
                }
            }
            AttrState::NameEnd => {
                if is_whitespace(b) || b == b'=' {
                    buf.terminate(pos);
                    name_end = pos;
                    state = AttrState::ValueStart;
                }
            }
            AttrState::ValueStart => {
                if b == b'"' || b == b'\'' {
                    quote = b;
                    value_start = pos + 1;
                    state = AttrState::ValueEnd;
                }
            }
            AttrState::ValueEnd => {
                if b == b'<' && buf.data()[pos..end].starts_with(CDATA_OPEN) {
                    state = AttrState::CDataEnd;
                    pos += CDATA_OPEN.len();
                    continue;
                }
                if b == quote {
                    buf.terminate(pos);
                    let value_end = strip_cdata_markers(buf, value_start, pos);
                    on_attribute(
                        Span::between(name_start, name_end),
                        Span::between(value_start, value_end),
                    );
                    state = AttrState::NameStart;
                }
            }
            AttrState::CDataEnd => {
                if b == b']' && buf.data()[pos..end].starts_with(CDATA_CLOSE) {
                    state = AttrState::ValueEnd;
                    pos += CDATA_CLOSE.len();
                    continue;
                }
            }
        }
        pos += 1;
    }
}

/// Remove every `<![CDATA[` / `]]>` pair inside `start..end`, returning the new
/// end of the value. Freed bytes at the tail become NUL.
fn strip_cdata_markers(buf: &mut Buffer, start: usize, mut end: usize) -> usize {
    let mut pos = start;
    loop {
        let Some(open) = Scanner::at(&buf.data()[..end], pos).find(CDATA_OPEN) else {
            break;
        };
        end -= buf.splice_out(open, open + CDATA_OPEN.len(), end, 0);

        let Some(close) = Scanner::at(&buf.data()[..end], open).find(CDATA_CLOSE) else {
            break;
        };
        end -= buf.splice_out(close, close + CDATA_CLOSE.len(), end, 0);
        pos = close;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &[u8]) -> (Buffer, Vec<(Span, Span)>) {
        let mut buf = Buffer::new(input.to_vec()).unwrap();
        let mut attrs = Vec::new();
        let len = buf.len();
        scan_attributes(&mut buf, 0, len, |name, value| attrs.push((name, value)));
        (buf, attrs)
    }

    fn pairs(buf: &Buffer, attrs: &[(Span, Span)]) -> Vec<(String, String)> {
        attrs
            .iter()
            .map(|(n, v)| {
                (
                    String::from_utf8_lossy(buf.slice(*n)).into_owned(),
                    String::from_utf8_lossy(buf.slice(*v)).into_owned(),
                )
            })
            .collect()
    }

    #[test]
    fn test_double_and_single_quotes() {
        let (buf, attrs) = scan(b" a=\"1\" b='two'");
        assert_eq!(
            pairs(&buf, &attrs),
            vec![("a".into(), "1".into()), ("b".into(), "two".into())]
        );
    }

    #[test]
    fn test_other_quote_inside_value() {
        let (buf, attrs) = scan(b" q=\"it's\" r='he said \"hi\"'");
        assert_eq!(
            pairs(&buf, &attrs),
            vec![
                ("q".into(), "it's".into()),
                ("r".into(), "he said \"hi\"".into())
            ]
        );
    }

    #[test]
    fn test_whitespace_around_equals() {
        let (buf, attrs) = scan(b"  key =\n 'v' ");
        assert_eq!(pairs(&buf, &attrs), vec![("key".into(), "v".into())]);
    }

    #[test]
    fn test_cdata_in_value_is_unwrapped() {
        let (buf, attrs) = scan(b" expr=\"<![CDATA[a<\"b\">c]]>!\"");
        assert_eq!(pairs(&buf, &attrs), vec![("expr".into(), "a<\"b\">c!".into())]);
    }

    #[test]
    fn test_value_without_quotes_dropped() {
        let (_, attrs) = scan(b" flag x=1");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_empty_value() {
        let (buf, attrs) = scan(b" e=\"\"");
        assert_eq!(pairs(&buf, &attrs), vec![("e".into(), "".into())]);
    }

    #[test]
    fn test_boundaries_nul_terminated() {
        let (buf, _) = scan(b" a=\"1\"");
        assert_eq!(buf.data(), b" a\0\"1\0");
    }
}
