//! Owned element tree produced by the renderers and mutated by the link
//! rewriter before it is serialized to HTML.

use html_escape::{encode_double_quoted_attribute, encode_text};
use scraper::{ElementRef, Html};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text content is emitted verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Text content, escaped on output
    Text(String),
    /// Pre-serialized content such as a JSON-LD payload, emitted as-is
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    /// Attributes in source order
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// Parse an HTML fragment into owned nodes. Comments and doctypes are dropped.
    pub fn parse_fragment(html: &str) -> Vec<Node> {
        let fragment = Html::parse_fragment(html);
        convert_element(fragment.root_element()).children
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Visit this node and every descendant element, depth first.
    pub fn walk_elements_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        if let Node::Element(element) = self {
            visit(element);
            for child in &mut element.children {
                child.walk_elements_mut(visit);
            }
        }
    }

    /// Collect references to every descendant element matching `predicate`.
    pub fn find_all<'a>(&'a self, predicate: &impl Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect(predicate, &mut found);
        found
    }

    fn collect<'a>(&'a self, predicate: &impl Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if let Node::Element(element) = self {
            if predicate(element) {
                found.push(element);
            }
            for child in &element.children {
                child.collect(predicate, found);
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&encode_text(text)),
            Node::Raw(raw) => out.push_str(raw),
            Node::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&encode_double_quoted_attribute(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
        }
    }
}

/// Serialize a sequence of sibling nodes.
pub fn to_html(nodes: &[Node]) -> String {
    nodes.iter().map(Node::to_html).collect()
}

fn convert_element(element: ElementRef<'_>) -> Element {
    let value = element.value();
    let tag = value.name().to_string();
    let raw_text = RAW_TEXT_ELEMENTS.contains(&tag.as_str());
    let attrs = value
        .attrs()
        .map(|(name, val)| (name.to_string(), val.to_string()))
        .collect();
    let children = element
        .children()
        .filter_map(|child| {
            if let Some(child_element) = ElementRef::wrap(child) {
                return Some(Node::Element(convert_element(child_element)));
            }
            let text = child.value().as_text()?;
            let content = (**text).to_string();
            Some(if raw_text {
                Node::Raw(content)
            } else {
                Node::Text(content)
            })
        })
        .collect();
    Element {
        tag,
        attrs,
        children,
    }
}
