//! XML Document - owner of the buffer and both node arenas
//!
//! The document takes ownership of the input bytes, decodes them in place
//! and keeps the rewritten buffer alive for as long as the tree is readable.
//! Every name, text and value returned here borrows from that buffer.

use std::path::Path;
use std::str::FromStr;

use super::arena::{ArenaStats, NodeArena};
use super::decoder::{DecodeStatus, Decoder};
use super::node::{Attribute, AttributeId, Element, ElementId};
use crate::config::ParseOptions;
use crate::core::buffer::Buffer;
use crate::error::{Result, XmlError};

/// A decoded XML document
pub struct XmlDocument {
    /// Rewritten input bytes
    buffer: Buffer,
    /// Arena of elements
    elements: NodeArena<Element>,
    /// Arena of attributes
    attributes: NodeArena<Attribute>,
    /// First top-level element
    root_element: Option<ElementId>,
    status: DecodeStatus,
}

impl XmlDocument {
    /// Decode a document, returning a partial tree for truncated input
    pub fn parse(input: Vec<u8>) -> Result<Self> {
        Self::parse_with(input, &ParseOptions::default())
    }

    /// Decode a document, rejecting truncated input with [`XmlError::Truncated`]
    pub fn parse_strict(input: Vec<u8>) -> Result<Self> {
        Self::parse_with(input, &ParseOptions::strict())
    }

    pub fn parse_with(input: Vec<u8>, options: &ParseOptions) -> Result<Self> {
        let mut buffer = Buffer::new(input)?;
        let mut elements = NodeArena::with_chunk_capacity(options.element_chunk_capacity);
        let mut attributes = NodeArena::with_chunk_capacity(options.attribute_chunk_capacity);

        let outcome = Decoder::new(&mut buffer, &mut elements, &mut attributes).decode()?;

        if options.strict {
            if let DecodeStatus::Truncated(truncation) = outcome.status {
                return Err(XmlError::Truncated(truncation));
            }
        }

        Ok(XmlDocument {
            buffer,
            elements,
            attributes,
            root_element: outcome.root,
            status: outcome.status,
        })
    }

    /// Read a file and decode it
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, &ParseOptions::default())
    }

    pub fn open_with<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded document");
        Self::parse_with(bytes, options)
    }

    /// Whether the scan reached the end of the data with every element closed
    #[inline]
    pub fn status(&self) -> DecodeStatus {
        self.status
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.status.is_complete()
    }

    /// The buffer after in-place decoding
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.data()
    }

    // ------------------------------------------------------------------------
    // Elements
    // ------------------------------------------------------------------------

    #[inline]
    pub fn root_element_id(&self) -> Option<ElementId> {
        self.root_element
    }

    #[inline]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Element name as raw bytes (empty for unknown handles)
    pub fn name_bytes(&self, id: ElementId) -> &[u8] {
        self.element(id)
            .map_or(&[][..], |e| self.buffer.slice(e.name))
    }

    /// Element name as string
    pub fn name(&self, id: ElementId) -> Option<&str> {
        std::str::from_utf8(self.name_bytes(id)).ok()
    }

    /// Trimmed text of a leaf element, if any
    pub fn text_bytes(&self, id: ElementId) -> Option<&[u8]> {
        let span = self.element(id)?.text_span()?;
        Some(self.buffer.slice(span))
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        std::str::from_utf8(self.text_bytes(id)?).ok()
    }

    /// Text of an element, failing when it has none
    pub fn required_text(&self, id: ElementId) -> Result<&str> {
        self.text(id)
            .ok_or_else(|| XmlError::ElementTextMissing(self.lossy_name(id)))
    }

    #[inline]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id)?.parent
    }

    #[inline]
    pub fn first_child(&self, id: ElementId) -> Option<ElementId> {
        self.element(id)?.first_child
    }

    #[inline]
    pub fn next_sibling(&self, id: ElementId) -> Option<ElementId> {
        self.element(id)?.next_sibling
    }

    #[inline]
    pub fn previous_sibling(&self, id: ElementId) -> Option<ElementId> {
        self.element(id)?.previous_sibling
    }

    /// Iterate over child elements
    pub fn children(&self, id: ElementId) -> ChildIter<'_> {
        ChildIter {
            doc: self,
            next: self.first_child(id),
        }
    }

    /// Iterate over all descendants in document order
    pub fn descendants(&self, id: ElementId) -> DescendantIter<'_> {
        let mut stack = Vec::new();
        if let Some(node) = self.element(id) {
            let mut child_id = node.current_child;
            while let Some(cid) = child_id {
                stack.push(cid);
                child_id = self.previous_sibling(cid);
            }
        }
        DescendantIter { doc: self, stack }
    }

    /// First child element with the given name
    pub fn child_named(&self, id: ElementId, name: &str) -> Option<ElementId> {
        self.children(id)
            .find(|&child| self.name_bytes(child) == name.as_bytes())
    }

    /// First following sibling with the given name
    pub fn next_sibling_named(&self, id: ElementId, name: &str) -> Option<ElementId> {
        let mut current = self.next_sibling(id);
        while let Some(sibling) = current {
            if self.name_bytes(sibling) == name.as_bytes() {
                return Some(sibling);
            }
            current = self.next_sibling(sibling);
        }
        None
    }

    pub fn required_child(&self, id: ElementId, name: &str) -> Result<ElementId> {
        self.child_named(id, name)
            .ok_or_else(|| XmlError::ElementNotFound(name.to_string()))
    }

    pub fn required_next_sibling(&self, id: ElementId, name: &str) -> Result<ElementId> {
        self.next_sibling_named(id, name)
            .ok_or_else(|| XmlError::ElementNotFound(name.to_string()))
    }

    // ------------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------------

    #[inline]
    pub fn attribute_node(&self, id: AttributeId) -> Option<&Attribute> {
        self.attributes.get(id)
    }

    pub fn attribute_name(&self, id: AttributeId) -> Option<&str> {
        let attr = self.attribute_node(id)?;
        attr.name.as_str(self.buffer.data())
    }

    pub fn attribute_value(&self, id: AttributeId) -> Option<&str> {
        let attr = self.attribute_node(id)?;
        attr.value.as_str(self.buffer.data())
    }

    /// Iterate over an element's attribute handles in document order
    pub fn attribute_ids(&self, id: ElementId) -> AttributeIter<'_> {
        AttributeIter {
            doc: self,
            next: self.element(id).and_then(|e| e.first_attribute),
        }
    }

    /// All attribute names and values for an element
    pub fn attributes(&self, id: ElementId) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attribute_ids(id)
            .filter_map(|attr| Some((self.attribute_name(attr)?, self.attribute_value(attr)?)))
    }

    /// Value of the first attribute with the given name
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.attribute_ids(id)
            .find(|&attr| {
                self.attribute_node(attr)
                    .is_some_and(|a| self.buffer.slice(a.name) == name.as_bytes())
            })
            .and_then(|attr| self.attribute_value(attr))
    }

    pub fn required_attribute(&self, id: ElementId, name: &str) -> Result<&str> {
        self.attribute(id, name)
            .ok_or_else(|| XmlError::AttributeNotFound(name.to_string()))
    }

    // ------------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------------

    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn element_arena_stats(&self) -> ArenaStats {
        self.elements.stats()
    }

    pub fn attribute_arena_stats(&self) -> ArenaStats {
        self.attributes.stats()
    }

    fn lossy_name(&self, id: ElementId) -> String {
        String::from_utf8_lossy(self.name_bytes(id)).into_owned()
    }
}

impl FromStr for XmlDocument {
    type Err = XmlError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.as_bytes().to_vec())
    }
}

/// Iterator over child elements
pub struct ChildIter<'a> {
    doc: &'a XmlDocument,
    next: Option<ElementId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.next_sibling(current);
        Some(current)
    }
}

/// Iterator over descendant elements (pre-order)
pub struct DescendantIter<'a> {
    doc: &'a XmlDocument,
    stack: Vec<ElementId>,
}

impl<'a> Iterator for DescendantIter<'a> {
    type Item = ElementId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        if let Some(node) = self.doc.element(current) {
            let mut child_id = node.current_child;
            while let Some(id) = child_id {
                self.stack.push(id);
                child_id = self.doc.previous_sibling(id);
            }
        }
        Some(current)
    }
}

/// Iterator over an element's attributes
pub struct AttributeIter<'a> {
    doc: &'a XmlDocument,
    next: Option<AttributeId>,
}

impl<'a> Iterator for AttributeIter<'a> {
    type Item = AttributeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.attribute_node(current).and_then(|a| a.next);
        Some(current)
    }
}
