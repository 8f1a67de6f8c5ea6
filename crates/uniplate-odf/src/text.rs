//! Plain-text extraction from document nodes
//!
//! Both the table loader and the template engine read text through these
//! two functions so that a cell and a template paragraph flatten the same
//! way.

use crate::names::TEXT_P;
use crate::xml::{Element, Node};

/// Concatenate all text data under a node, in document order
///
/// Formatting elements such as `text:s` or `text:tab` carry no character
/// data and therefore contribute nothing.
pub fn node_text(node: &Node) -> String {
    let mut text = String::new();
    push_node_text(node, &mut text);
    text
}

/// Concatenate all text data under an element, in document order
pub fn element_text(element: &Element) -> String {
    let mut text = String::new();
    for child in &element.children {
        push_node_text(child, &mut text);
    }
    text
}

fn push_node_text(node: &Node, out: &mut String) {
    match node {
        Node::Element(e) => {
            for child in &e.children {
                push_node_text(child, out);
            }
        }
        Node::Text(data) | Node::CData(data) => out.push_str(data),
        Node::Comment(_) | Node::ProcessingInstruction(_) => {}
    }
}

/// Text value of a spreadsheet cell: its paragraphs concatenated
pub fn cell_text(cell: &Element) -> String {
    cell.descendants(TEXT_P)
        .into_iter()
        .map(element_text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XmlDocument;

    fn parse(xml: &str) -> Element {
        XmlDocument::parse(xml.as_bytes()).unwrap().root
    }

    #[test]
    fn test_node_text_nested() {
        let p = parse("<text:p>a<text:span>b<text:span>c</text:span></text:span>d</text:p>");
        assert_eq!(node_text(&Node::Element(p.clone())), "abcd");
        assert_eq!(element_text(&p), "abcd");
    }

    #[test]
    fn test_node_text_leaf() {
        assert_eq!(node_text(&Node::Text("plain".to_string())), "plain");
        assert_eq!(node_text(&Node::Comment("hidden".to_string())), "");
    }

    #[test]
    fn test_cell_text_joins_paragraphs() {
        let cell = parse(
            r#"<table:table-cell office:value-type="string"><text:p>first</text:p><text:p>second</text:p></table:table-cell>"#,
        );
        assert_eq!(cell_text(&cell), "firstsecond");
    }

    #[test]
    fn test_cell_text_empty_cell() {
        let cell = parse(r#"<table:table-cell table:number-columns-repeated="3"/>"#);
        assert_eq!(cell_text(&cell), "");
    }

    #[test]
    fn test_cell_text_ignores_spacing_elements() {
        let cell = parse("<table:table-cell><text:p>a<text:s/>b</text:p></table:table-cell>");
        assert_eq!(cell_text(&cell), "ab");
    }
}
