//! slabxml - In-place XML decoding over a single owned buffer
//!
//! The document buffer is decoded in one forward pass and rewritten as it
//! goes: tag and value boundaries become NUL bytes and CDATA markers are
//! shifted out. Names, text and attribute values are spans into that buffer,
//! so no string is ever copied. Elements and attributes come from chunked
//! arenas and link to each other through `u32` handles.
//!
//! ```
//! use slabxml::XmlDocument;
//!
//! let doc: XmlDocument = "<root a=\"1\"><child>hello</child></root>".parse().unwrap();
//! let root = doc.root_element_id().unwrap();
//! assert_eq!(doc.attribute(root, "a"), Some("1"));
//!
//! let child = doc.child_named(root, "child").unwrap();
//! assert_eq!(doc.text(child), Some("hello"));
//! ```
//!
//! Modules:
//! - core: buffer, scanner, attribute state machine, spans
//! - dom: arenas, decoder, element tree and accessors
//! - strategy: parallel batch decoding

mod config;
mod core;
mod dom;
mod error;
mod strategy;

pub use crate::config::{ParseOptions, DEFAULT_CHUNK_CAPACITY};
pub use crate::core::span::Span;
pub use crate::dom::{
    ArenaStats, Attribute, AttributeId, AttributeIter, ChildIter, DecodeStatus, DescendantIter,
    Element, ElementId, XmlDocument,
};
pub use crate::error::{Result, Truncation, XmlError};
pub use crate::strategy::{open_all, parse_all};

// ============================================================================
// Convenience entry points
// ============================================================================

/// Decode a string, returning a partial tree for truncated input
pub fn parse(input: &str) -> Result<XmlDocument> {
    XmlDocument::parse(input.as_bytes().to_vec())
}

/// Decode a string, rejecting truncated input
pub fn parse_strict(input: &str) -> Result<XmlDocument> {
    XmlDocument::parse_strict(input.as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    }

    /// Rebuild the tag/attribute/text content of a tree as a compact string
    fn render(doc: &XmlDocument, id: ElementId, out: &mut String) {
        out.push('<');
        out.push_str(doc.name(id).unwrap());
        for (name, value) in doc.attributes(id) {
            out.push_str(&format!(" {name}=[{value}]"));
        }
        out.push('>');
        if let Some(text) = doc.text(id) {
            out.push_str(text);
        }
        for child in doc.children(id) {
            render(doc, child, out);
        }
        out.push_str("</");
        out.push_str(doc.name(id).unwrap());
        out.push('>');
    }

    fn rendered(input: &str) -> String {
        let doc = parse(input).unwrap();
        let mut out = String::new();
        render(&doc, doc.root_element_id().unwrap(), &mut out);
        out
    }

    #[test]
    fn test_worked_examples() {
        init_tracing();

        let doc = parse("<root a=\"1\"><child>hello</child></root>").unwrap();
        let root = doc.root_element_id().unwrap();
        assert_eq!(doc.attributes(root).collect::<Vec<_>>(), vec![("a", "1")]);
        let children: Vec<_> = doc.children(root).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(doc.name(children[0]), Some("child"));
        assert_eq!(doc.text(children[0]), Some("hello"));
        assert_eq!(doc.attribute_ids(children[0]).count(), 0);

        let doc = parse("<a><!-- skip --><b/></a>").unwrap();
        let a = doc.root_element_id().unwrap();
        assert_eq!(doc.text(a), None);
        let children: Vec<_> = doc.children(a).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(doc.name(children[0]), Some("b"));

        let doc = parse("<a>x<![CDATA[<y>]]>z</a>").unwrap();
        assert_eq!(doc.text(doc.root_element_id().unwrap()), Some("x<y>z"));

        match parse("<a><b></a>") {
            Err(XmlError::TagMismatch { expected, found }) => {
                let mut names = [expected, found];
                names.sort();
                assert_eq!(names, ["a".to_string(), "b".to_string()]);
            }
            other => panic!("expected mismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_content_reproduced_without_comments_and_markers() {
        let input = "<?xml version='1.0'?>\n\
            <!-- header -->\n\
            <catalog region=\"eu\">\n\
              <book id='b1' title=\"it's\"><name>Dune</name><price>9.99</price></book>\n\
              <!-- between books -->\n\
              <book id='b2' title='say \"hi\"'><name>Emma <!-- aside -->Woodhouse</name></book>\n\
              <note><![CDATA[a < b && c > d]]></note>\n\
            </catalog>";

        assert_eq!(
            rendered(input),
            "<catalog region=[eu]>\
             <book id=[b1] title=[it's]><name>Dune</name><price>9.99</price></book>\
             <book id=[b2] title=[say \"hi\"]><name>Emma Woodhouse</name></book>\
             <note>a < b && c > d</note>\
             </catalog>"
        );
    }

    #[test]
    fn test_cdata_in_attribute_value() {
        let doc = parse("<q expr=\"<![CDATA[x<y>]]>\" other='1'/>").unwrap();
        let q = doc.root_element_id().unwrap();
        assert_eq!(doc.attribute(q, "expr"), Some("x<y>"));
        assert_eq!(doc.attribute(q, "other"), Some("1"));
    }

    #[test]
    fn test_leaf_text_only() {
        let doc = parse("<r>  lead <a> inner </a> tail </r>").unwrap();
        let r = doc.root_element_id().unwrap();
        assert_eq!(doc.text(r), None);
        let a = doc.first_child(r).unwrap();
        assert_eq!(doc.text(a), Some("inner"));
    }

    #[test]
    fn test_strict_and_lenient_entry_points() {
        init_tracing();

        let doc = parse("<r><a>ok</a><b").unwrap();
        assert_eq!(
            doc.status(),
            DecodeStatus::Truncated(Truncation::Tag { offset: 12 })
        );
        assert_eq!(doc.element_count(), 2);

        assert!(matches!(
            parse_strict("<r><a>ok</a><b"),
            Err(XmlError::Truncated(Truncation::Tag { offset: 12 }))
        ));
        assert!(parse_strict("<r/>").unwrap().is_complete());
    }

    #[test]
    fn test_many_elements_cross_chunks() {
        let mut input = String::from("<list>");
        for i in 0..250 {
            input.push_str(&format!("<item n='{i}' m='{}'>{i}</item>", i * 2));
        }
        input.push_str("</list>");

        let doc = parse(&input).unwrap();
        let list = doc.root_element_id().unwrap();
        assert_eq!(doc.element_count(), 251);
        assert_eq!(doc.element_arena_stats().chunk_count, 3);
        assert_eq!(doc.attribute_arena_stats().chunk_count, 5);

        for (i, item) in doc.children(list).enumerate() {
            assert_eq!(doc.text(item), Some(i.to_string().as_str()));
            assert_eq!(doc.attribute(item, "m"), Some((i * 2).to_string().as_str()));
            assert_eq!(doc.parent(item), Some(list));
        }
        assert_eq!(doc.descendants(list).count(), 250);
    }

    #[test]
    fn test_document_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<XmlDocument>();
    }
}
