//! Mutable XML element tree
//!
//! OpenDocument parts are small enough to hold in memory as an owned tree.
//! Element and attribute names are kept as qualified names exactly as they
//! appear in the file (`table:table-cell`), which matches the prefixes every
//! OpenDocument producer writes.

use std::borrow::Cow;

use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};

use crate::error::{OdfError, Result};

/// A node in the tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An element with attributes and children
    Element(Element),
    /// Character data (unescaped)
    Text(String),
    /// A CDATA section
    CData(String),
    /// A comment, kept verbatim
    Comment(String),
    /// A processing instruction, kept verbatim
    ProcessingInstruction(String),
}

/// An XML element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Qualified name, e.g. `text:p`
    pub name: String,
    /// Attributes in document order (unescaped values)
    pub attributes: Vec<(String, String)>,
    /// Child nodes
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Builder-style child appender
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style text appender
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    /// Get an attribute value by qualified name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set or replace an attribute
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Iterate over direct child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// All descendant elements with the given name, in document order
    ///
    /// The element itself is not included. Matches nested inside other
    /// matches are returned too.
    pub fn descendants(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in self.child_elements() {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }

    /// Visit every descendant element with the given name mutably
    pub fn visit_descendants_mut<F>(&mut self, name: &str, f: &mut F)
    where
        F: FnMut(&mut Element),
    {
        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                if e.name == name {
                    f(e);
                }
                e.visit_descendants_mut(name, f);
            }
        }
    }

    /// Visit every text node below this element mutably
    pub fn visit_text_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut String),
    {
        for child in self.children.iter_mut() {
            match child {
                Node::Element(e) => e.visit_text_mut(f),
                Node::Text(text) | Node::CData(text) => f(text),
                _ => {}
            }
        }
    }

    /// Remove every descendant element matching the predicate
    ///
    /// Returns the number of removed elements. Children of a removed
    /// element are not inspected.
    pub fn remove_descendants<P>(&mut self, predicate: &P) -> usize
    where
        P: Fn(&Element) -> bool,
    {
        let before = self.children.len();
        self.children
            .retain(|node| !matches!(node, Node::Element(e) if predicate(e)));
        let mut removed = before - self.children.len();

        for child in self.children.iter_mut() {
            if let Node::Element(e) = child {
                removed += e.remove_descendants(predicate);
            }
        }
        removed
    }
}

/// A parsed XML part
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    /// Whether the source carried an XML declaration
    pub has_declaration: bool,
    /// Root element
    pub root: Element,
}

impl XmlDocument {
    /// Parse XML bytes into a tree
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        // Whitespace inside paragraphs is content
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut has_declaration = false;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Decl(_) => has_declaration = true,
                Event::Start(e) => stack.push(element_from_start(&e)?),
                Event::Empty(e) => {
                    let element = element_from_start(&e)?;
                    attach(&mut stack, &mut root, Node::Element(element))?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        OdfError::InvalidStructure("unbalanced end tag".to_string())
                    })?;
                    attach(&mut stack, &mut root, Node::Element(element))?;
                }
                Event::Text(e) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Text(e.unescape()?.into_owned()));
                    }
                }
                Event::CData(e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                        parent.children.push(Node::CData(text));
                    }
                }
                Event::Comment(e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                        parent.children.push(Node::Comment(text));
                    }
                }
                Event::PI(e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                        parent.children.push(Node::ProcessingInstruction(text));
                    }
                }
                Event::DocType(_) => {}
                Event::Eof => break,
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(OdfError::InvalidStructure(format!(
                "unclosed element <{}>",
                stack[stack.len() - 1].name
            )));
        }

        let root =
            root.ok_or_else(|| OdfError::InvalidStructure("no root element".to_string()))?;
        Ok(Self {
            has_declaration,
            root,
        })
    }

    /// Serialize the tree back to XML bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        if self.has_declaration {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        write_element(&mut writer, &self.root)?;
        Ok(writer.into_inner())
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Escape an attribute value, keeping whitespace characters that
/// attribute-value normalisation would otherwise turn into spaces
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in escape(value).chars() {
        match c {
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, node: Node) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(node);
            Ok(())
        }
        None => match node {
            Node::Element(e) if root.is_none() => {
                *root = Some(e);
                Ok(())
            }
            _ => Err(OdfError::InvalidStructure(
                "more than one root element".to_string(),
            )),
        },
    }
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Owned(escape_attribute(value).into_bytes()),
        });
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            Node::CData(text) => writer.write_event(Event::CData(BytesCData::new(text.as_str())))?,
            Node::Comment(text) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?
            }
            Node::ProcessingInstruction(text) => {
                writer.write_event(Event::PI(BytesPI::new(text.as_str())))?
            }
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
