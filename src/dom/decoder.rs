//! Decoder - single forward pass from buffer to element tree
//!
//! The decoder walks the buffer once with a cursor. Tags are found with the
//! memchr scanner, the buffer is rewritten in place (NUL at tag boundaries,
//! CDATA markers and in-text comments shifted out), and elements and
//! attributes are pulled from the arenas as they are recognized.
//!
//! Text after an opening tag is provisional. It is closed off at the next
//! tag, dropped when a child element is linked, and trimmed and committed at
//! the element's closing tag.

use crate::core::attributes::scan_attributes;
use crate::core::buffer::Buffer;
use crate::core::scanner::{
    is_whitespace, trim_range, Scanner, CDATA_CLOSE, CDATA_OPEN, COMMENT_CLOSE, COMMENT_OPEN,
};
use crate::core::span::Span;
use crate::error::{Result, Truncation, XmlError};

use super::arena::NodeArena;
use super::node::{Attribute, AttributeId, Element, ElementId, Text};

/// Whether a decode consumed the whole document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    /// Every element was closed and the data was scanned to the end
    Complete,
    /// The scan stopped early; the tree holds everything decoded up to that point
    Truncated(Truncation),
}

impl DecodeStatus {
    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self, DecodeStatus::Complete)
    }
}

/// Result of a successful decode
#[derive(Debug, Clone, Copy)]
pub struct DecodeOutcome {
    pub root: Option<ElementId>,
    pub status: DecodeStatus,
}

pub struct Decoder<'d> {
    buf: &'d mut Buffer,
    elements: &'d mut NodeArena<Element>,
    attributes: &'d mut NodeArena<Attribute>,
    root: Option<ElementId>,
    /// Last element opened at document level
    last_top_level: Option<ElementId>,
    /// Innermost open element
    parent: Option<ElementId>,
    depth: usize,
    /// Element whose provisional text has no end yet
    open_text: Option<ElementId>,
    pos: usize,
}

impl<'d> Decoder<'d> {
    pub fn new(
        buf: &'d mut Buffer,
        elements: &'d mut NodeArena<Element>,
        attributes: &'d mut NodeArena<Attribute>,
    ) -> Self {
        Decoder {
            buf,
            elements,
            attributes,
            root: None,
            last_top_level: None,
            parent: None,
            depth: 0,
            open_text: None,
            pos: 0,
        }
    }

    /// Run the scan to the end of the buffer.
    ///
    /// Fails only on a closing tag whose name differs from the innermost open
    /// element. Truncated input is reported through the returned status.
    pub fn decode(mut self) -> Result<DecodeOutcome> {
        tracing::debug!(bytes = self.buf.len(), "decoding document");

        let status = loop {
            let Some(lt) = Scanner::at(self.buf.data(), self.pos).find_tag_start() else {
                break self.end_of_data();
            };

            let at_lt = Scanner::at(self.buf.data(), lt);
            let is_comment = at_lt.starts_with(COMMENT_OPEN);
            let is_cdata = at_lt.starts_with(CDATA_OPEN);

            if is_comment {
                match self.skip_comment(lt) {
                    Some(next) => {
                        self.pos = next;
                        continue;
                    }
                    None => break DecodeStatus::Truncated(Truncation::Comment { offset: lt }),
                }
            }
            if is_cdata {
                match self.unwrap_cdata(lt) {
                    Some(next) => {
                        self.pos = next;
                        continue;
                    }
                    None => break DecodeStatus::Truncated(Truncation::CData { offset: lt }),
                }
            }

            let Some(gt) = Scanner::at(self.buf.data(), lt + 1).find_tag_end() else {
                break DecodeStatus::Truncated(Truncation::Tag { offset: lt });
            };

            self.close_text(lt);
            self.buf.terminate(gt);
            self.buf.terminate(lt);

            match self.buf.byte(lt + 1) {
                Some(b'?') | Some(b'!') => {
                    tracing::trace!(offset = lt, "skipping declaration");
                }
                Some(b'/') => self.close_element(lt, gt)?,
                _ => self.open_element(lt, gt),
            }

            self.pos = gt + 1;
        };

        if let DecodeStatus::Truncated(truncation) = status {
            tracing::debug!(%truncation, "decode stopped early");
        }
        tracing::debug!(
            elements = self.elements.len(),
            attributes = self.attributes.len(),
            "decoded document"
        );

        Ok(DecodeOutcome {
            root: self.root,
            status,
        })
    }

    fn end_of_data(&self) -> DecodeStatus {
        if self.depth > 0 {
            DecodeStatus::Truncated(Truncation::UnclosedElements { depth: self.depth })
        } else {
            DecodeStatus::Complete
        }
    }

    /// Skip the comment opening at `lt`, returning where to resume.
    ///
    /// Inside running text the comment is shifted out so the text reads as if
    /// it had never been there.
    fn skip_comment(&mut self, lt: usize) -> Option<usize> {
        let close = Scanner::at(self.buf.data(), lt + COMMENT_OPEN.len()).find_comment_end()?;
        let end = close + COMMENT_CLOSE.len();
        if self.open_text.is_none() {
            return Some(end);
        }

        let boundary = self.markup_boundary(end);
        self.buf.splice_out(lt, end, boundary, b' ');
        Some(lt)
    }

    /// Remove the CDATA markers around the section opening at `lt`, returning
    /// the position just past the unwrapped payload.
    fn unwrap_cdata(&mut self, lt: usize) -> Option<usize> {
        let close = Scanner::at(self.buf.data(), lt + CDATA_OPEN.len()).find_cdata_end()?;
        let boundary = self.markup_boundary(close + CDATA_CLOSE.len());

        let removed = self.buf.splice_out(lt, lt + CDATA_OPEN.len(), boundary, b' ');
        let close = close - removed;
        self.buf
            .splice_out(close, close + CDATA_CLOSE.len(), boundary, b' ');
        Some(close)
    }

    /// Position of the next real tag after `from`, or the end of data
    fn markup_boundary(&self, from: usize) -> usize {
        Scanner::at(self.buf.data(), from)
            .find_markup_boundary()
            .unwrap_or(self.buf.len())
    }

    /// Fix the end of any open provisional text at the tag starting at `lt`
    fn close_text(&mut self, lt: usize) {
        let Some(id) = self.open_text.take() else {
            return;
        };
        let element = &mut self.elements[id];
        if let Text::Provisional(span) = element.text {
            element.text = Text::Provisional(Span::between(span.start(), lt));
        }
    }

    fn open_element(&mut self, lt: usize, gt: usize) {
        let self_closing = gt > lt + 1 && self.buf.data()[gt - 1] == b'/';
        let attr_end = if self_closing { gt - 1 } else { gt };

        let name_start = lt + 1;
        let name_end = Scanner::at(self.buf.data(), name_start).find_name_end(attr_end);

        let id: ElementId = self.elements.alloc();
        self.elements[id].name = Span::between(name_start, name_end);
        self.link(id);

        if name_end < attr_end {
            self.buf.terminate(name_end);
            self.read_attributes(id, name_end + 1, attr_end);
        }

        if self_closing {
            return;
        }

        // No text when a real tag follows straight away. A CDATA section or a
        // comment still counts as the start of running text.
        let text_start = gt + 1;
        let has_text = match self.buf.byte(text_start) {
            None => false,
            Some(b'<') => {
                let next = Scanner::at(self.buf.data(), text_start);
                next.starts_with(CDATA_OPEN) || next.starts_with(COMMENT_OPEN)
            }
            Some(_) => true,
        };
        if has_text {
            self.elements[id].text = Text::Provisional(Span::between(text_start, text_start));
            self.open_text = Some(id);
        }
        self.parent = Some(id);
        self.depth += 1;
    }

    /// Attach a new element under the open parent, or at document level
    fn link(&mut self, id: ElementId) {
        let Some(parent) = self.parent else {
            match self.last_top_level {
                None => self.root = Some(id),
                Some(previous) => {
                    self.elements[previous].next_sibling = Some(id);
                    self.elements[id].previous_sibling = Some(previous);
                }
            }
            self.last_top_level = Some(id);
            return;
        };

        let parent_node = &mut self.elements[parent];
        let previous = parent_node.current_child;
        if previous.is_none() {
            parent_node.first_child = Some(id);
        }
        parent_node.current_child = Some(id);
        // Text is only kept for leaf elements
        parent_node.text = Text::Absent;

        if let Some(previous) = previous {
            self.elements[previous].next_sibling = Some(id);
        }
        let child = &mut self.elements[id];
        child.parent = Some(parent);
        child.previous_sibling = previous;
    }

    fn read_attributes(&mut self, element: ElementId, start: usize, end: usize) {
        let elements = &mut *self.elements;
        let attributes = &mut *self.attributes;
        let mut tail: Option<AttributeId> = None;

        scan_attributes(self.buf, start, end, |name, value| {
            let id: AttributeId = attributes.alloc();
            let attribute = &mut attributes[id];
            attribute.name = name;
            attribute.value = value;

            match tail {
                Some(previous) => attributes[previous].next = Some(id),
                None => elements[element].first_attribute = Some(id),
            }
            tail = Some(id);
        });
    }

    fn close_element(&mut self, lt: usize, gt: usize) -> Result<()> {
        let Some(open) = self.parent else {
            tracing::trace!(offset = lt, "closing tag with no open element");
            return Ok(());
        };

        let data = self.buf.data();
        let name_start = lt + 2;
        let mut name_end = gt;
        while name_end > name_start && is_whitespace(data[name_end - 1]) {
            name_end -= 1;
        }

        if name_end > name_start {
            let expected = self.buf.slice(self.elements[open].name);
            let found = &data[name_start..name_end];
            if expected != found {
                return Err(XmlError::TagMismatch {
                    expected: String::from_utf8_lossy(expected).into_owned(),
                    found: String::from_utf8_lossy(found).into_owned(),
                });
            }
        }

        self.commit_text(open);
        self.parent = self.elements[open].parent;
        self.depth -= 1;
        Ok(())
    }

    /// Trim provisional text in place and make it visible, or drop it when
    /// nothing but whitespace remains.
    fn commit_text(&mut self, id: ElementId) {
        let Text::Provisional(span) = self.elements[id].text else {
            return;
        };

        let (start, end) = trim_range(self.buf.data(), span.start(), span.end());
        if end < span.end() {
            self.buf.terminate(end);
        }
        self.elements[id].text = if start < end {
            Text::Committed(Span::between(start, end))
        } else {
            Text::Absent
        };
    }
}
