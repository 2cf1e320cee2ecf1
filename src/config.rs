//! Decoder configuration

/// Nodes per arena chunk when no capacity is configured.
pub const DEFAULT_CHUNK_CAPACITY: usize = 100;

/// Options controlling a single decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Elements per chunk of the element arena
    pub element_chunk_capacity: usize,
    /// Attributes per chunk of the attribute arena
    pub attribute_chunk_capacity: usize,
    /// Reject truncated documents instead of returning a partial tree
    pub strict: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            element_chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            attribute_chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            strict: false,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lenient defaults with strict truncation handling
    pub fn strict() -> Self {
        ParseOptions {
            strict: true,
            ..Self::default()
        }
    }

    pub fn with_element_chunk_capacity(mut self, capacity: usize) -> Self {
        self.element_chunk_capacity = capacity.max(1);
        self
    }

    pub fn with_attribute_chunk_capacity(mut self, capacity: usize) -> Self {
        self.attribute_chunk_capacity = capacity.max(1);
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ParseOptions::default();
        assert_eq!(opts.element_chunk_capacity, 100);
        assert_eq!(opts.attribute_chunk_capacity, 100);
        assert!(!opts.strict);
        assert!(ParseOptions::strict().strict);
        assert!(ParseOptions::new().with_strict(true).strict);
        assert!(!ParseOptions::strict().with_strict(false).strict);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let opts = ParseOptions::new()
            .with_element_chunk_capacity(0)
            .with_attribute_chunk_capacity(0);
        assert_eq!(opts.element_chunk_capacity, 1);
        assert_eq!(opts.attribute_chunk_capacity, 1);
    }
}
