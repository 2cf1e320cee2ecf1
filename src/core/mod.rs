//! Core XML decoding primitives
//!
//! This module contains the fundamental building blocks for decoding:
//! - Buffer: owned byte region rewritten in place
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Attributes: in-place attribute scanning state machine
//! - Span: offset/length views into the buffer

pub mod attributes;
pub mod buffer;
pub mod scanner;
pub mod span;
