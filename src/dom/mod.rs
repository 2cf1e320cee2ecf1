//! DOM Module - Arena-based XML Document
//!
//! Implements the element tree using:
//! - Chunked arenas for elements and attributes
//! - `ElementId` / `AttributeId` (u32) handles for links
//! - Spans into the decoded buffer for every string

pub mod arena;
pub mod decoder;
pub mod document;
pub mod node;

pub use arena::ArenaStats;
pub use decoder::DecodeStatus;
pub use document::{AttributeIter, ChildIter, DescendantIter, XmlDocument};
pub use node::{Attribute, AttributeId, Element, ElementId};
