//! Error types for decoding and navigation
//!
//! One flat enum for the whole crate. Truncation is not an error in lenient
//! mode; it is reported through [`DecodeStatus`](crate::DecodeStatus) instead.

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, XmlError>;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("Tag mismatch: <{expected}> closed with </{found}>")]
    TagMismatch { expected: String, found: String },

    #[error("Document truncated: {0}")]
    Truncated(Truncation),

    #[error("Document too large: {0} bytes exceeds the 4 GiB span limit")]
    TooLarge(usize),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Attribute not found: {0}")]
    AttributeNotFound(String),

    #[error("Element text is empty: <{0}>")]
    ElementTextMissing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where a decode stopped short of the end of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truncation {
    /// A `<` with no matching `>`.
    Tag { offset: usize },
    /// A `<!--` with no `-->`.
    Comment { offset: usize },
    /// A `<![CDATA[` with no `]]>`.
    CData { offset: usize },
    /// Data ended while elements were still open.
    UnclosedElements { depth: usize },
}

impl fmt::Display for Truncation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Truncation::Tag { offset } => write!(f, "unterminated tag at byte {}", offset),
            Truncation::Comment { offset } => {
                write!(f, "unterminated comment at byte {}", offset)
            }
            Truncation::CData { offset } => {
                write!(f, "unterminated CDATA section at byte {}", offset)
            }
            Truncation::UnclosedElements { depth } => {
                write!(f, "{} element(s) left open at end of data", depth)
            }
        }
    }
}
