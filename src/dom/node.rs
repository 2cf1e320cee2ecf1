//! XML node representation
//!
//! Elements and attributes are arena slots linked by `u32` handles. Every
//! string field is a [`Span`] into the document buffer.

use super::arena::ArenaId;
use crate::core::span::Span;

/// Handle to an element in the element arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32);

/// Handle to an attribute in the attribute arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeId(pub(crate) u32);

impl ArenaId for ElementId {
    #[inline]
    fn from_index(index: usize) -> Self {
        ElementId(index as u32)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl ArenaId for AttributeId {
    #[inline]
    fn from_index(index: usize) -> Self {
        AttributeId(index as u32)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Text attached to an element.
///
/// Text right after an opening tag is provisional until the decoder knows
/// whether child elements follow. Linking a child drops it; the closing tag
/// trims and commits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Text {
    #[default]
    Absent,
    Provisional(Span),
    Committed(Span),
}

impl Text {
    /// The span readers may see, only once committed
    #[inline]
    pub fn committed(&self) -> Option<Span> {
        match self {
            Text::Committed(span) => Some(*span),
            _ => None,
        }
    }
}

/// One XML tag instance
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub(crate) name: Span,
    pub(crate) text: Text,
    pub(crate) first_attribute: Option<AttributeId>,
    pub(crate) parent: Option<ElementId>,
    pub(crate) first_child: Option<ElementId>,
    /// Last child linked so far, used while building
    pub(crate) current_child: Option<ElementId>,
    pub(crate) next_sibling: Option<ElementId>,
    pub(crate) previous_sibling: Option<ElementId>,
}

impl Element {
    #[inline]
    pub fn name_span(&self) -> Span {
        self.name
    }

    #[inline]
    pub fn text_span(&self) -> Option<Span> {
        self.text.committed()
    }

    #[inline]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    #[inline]
    pub fn first_child(&self) -> Option<ElementId> {
        self.first_child
    }

    #[inline]
    pub fn last_child(&self) -> Option<ElementId> {
        self.current_child
    }

    #[inline]
    pub fn next_sibling(&self) -> Option<ElementId> {
        self.next_sibling
    }

    #[inline]
    pub fn previous_sibling(&self) -> Option<ElementId> {
        self.previous_sibling
    }

    #[inline]
    pub fn first_attribute(&self) -> Option<AttributeId> {
        self.first_attribute
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    #[inline]
    pub fn has_attributes(&self) -> bool {
        self.first_attribute.is_some()
    }
}

/// A name/value pair in document order
#[derive(Debug, Clone, Default)]
pub struct Attribute {
    pub(crate) name: Span,
    pub(crate) value: Span,
    pub(crate) next: Option<AttributeId>,
}

impl Attribute {
    #[inline]
    pub fn name_span(&self) -> Span {
        self.name
    }

    #[inline]
    pub fn value_span(&self) -> Span {
        self.value
    }

    #[inline]
    pub fn next(&self) -> Option<AttributeId> {
        self.next
    }
}
