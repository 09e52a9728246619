// Copyright 2025 the ChartFrame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory element tree with markup serialization.

use smallvec::SmallVec;

use crate::tree::{CollaboratorUnavailable, DrawTree, DrawTreeProvider, NodeId};

#[derive(Clone, Debug)]
struct Element {
    name: String,
    attributes: SmallVec<[(String, String); 4]>,
    children: SmallVec<[NodeId; 4]>,
    text: Option<String>,
    parent: Option<NodeId>,
}

impl Element {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: SmallVec::new(),
            children: SmallVec::new(),
            text: None,
            parent: None,
        }
    }
}

/// An arena-backed element tree that serializes like DOM `outerHTML`.
///
/// Every element is written with an explicit closing tag. Attribute values and text are
/// XML-escaped.
#[derive(Clone, Debug, Default)]
pub struct SvgDocument {
    nodes: Vec<Element>,
}

impl SvgDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of elements created so far (attached or not).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no element has been created.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the element name of `node`.
    pub fn name(&self, node: NodeId) -> &str {
        &self.element(node).name
    }

    /// Returns the value of attribute `name` on `node`, if set.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the attributes of `node` in insertion order.
    pub fn attributes(&self, node: NodeId) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.element(node)
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the children of `node` in append order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.element(node).children
    }

    /// Returns the parent of `node`, if attached.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node).parent
    }

    /// Returns the text content of `node`, if set.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.element(node).text.as_deref()
    }

    fn element(&self, node: NodeId) -> &Element {
        &self.nodes[node.index()]
    }

    fn element_mut(&mut self, node: NodeId) -> &mut Element {
        &mut self.nodes[node.index()]
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == candidate {
                return true;
            }
            cur = self.element(n).parent;
        }
        false
    }

    fn write_node(&self, out: &mut String, node: NodeId) {
        let el = self.element(node);
        out.push('<');
        out.push_str(&el.name);
        for (k, v) in &el.attributes {
            out.push_str(&format!(r#" {k}="{}""#, escape_xml(v)));
        }
        out.push('>');
        if let Some(text) = &el.text {
            out.push_str(&escape_xml(text));
        }
        for child in &el.children {
            self.write_node(out, *child);
        }
        out.push_str("</");
        out.push_str(&el.name);
        out.push('>');
    }
}

impl DrawTree for SvgDocument {
    fn create_element(&mut self, name: &str) -> NodeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "chart trees stay far below u32::MAX nodes"
        )]
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Element::new(name));
        id
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.is_ancestor_or_self(child, parent) {
            tracing::warn!(?parent, ?child, "refusing to append an ancestor as a child");
            return;
        }
        if let Some(old) = self.element(child).parent {
            self.element_mut(old).children.retain(|c| *c != child);
        }
        self.element_mut(parent).children.push(child);
        self.element_mut(child).parent = Some(parent);
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let attrs = &mut self.element_mut(node).attributes;
        match attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.element_mut(node).text = Some(text.to_string());
    }

    fn serialize(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.write_node(&mut out, root);
        out
    }
}

/// Creates a fresh [`SvgDocument`] for every render.
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgDocumentProvider;

impl DrawTreeProvider for SvgDocumentProvider {
    type Tree = SvgDocument;

    fn create(&self) -> Result<SvgDocument, CollaboratorUnavailable> {
        Ok(SvgDocument::new())
    }
}

/// Escapes the five XML special characters.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_elements_serialize_in_append_order() {
        let mut doc = SvgDocument::new();
        let svg = doc.create_element("svg");
        doc.set_attribute(svg, "width", "10");
        let g = doc.create_element("g");
        let line = doc.create_element("line");
        let text = doc.create_element("text");
        doc.set_text(text, "a");
        doc.append_child(svg, g);
        doc.append_child(g, line);
        doc.append_child(g, text);

        assert_eq!(
            doc.serialize(svg),
            r#"<svg width="10"><g><line></line><text>a</text></g></svg>"#
        );
    }

    #[test]
    fn set_attribute_replaces_in_place() {
        let mut doc = SvgDocument::new();
        let g = doc.create_element("g");
        doc.set_attribute(g, "a", "1");
        doc.set_attribute(g, "b", "2");
        doc.set_attribute(g, "a", "3");

        let attrs: Vec<_> = doc.attributes(g).collect();
        assert_eq!(attrs, vec![("a", "3"), ("b", "2")]);
        assert_eq!(doc.serialize(g), r#"<g a="3" b="2"></g>"#);
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let mut doc = SvgDocument::new();
        let t = doc.create_element("text");
        doc.set_attribute(t, "data-x", r#"a"b"#);
        doc.set_text(t, "1 < 2 & 3");
        assert_eq!(
            doc.serialize(t),
            r#"<text data-x="a&quot;b">1 &lt; 2 &amp; 3</text>"#
        );
    }

    #[test]
    fn append_moves_an_attached_child() {
        let mut doc = SvgDocument::new();
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        let c = doc.create_element("c");
        doc.append_child(a, c);
        doc.append_child(b, c);

        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[c]);
        assert_eq!(doc.parent(c), Some(b));
    }

    #[test]
    fn append_refuses_cycles() {
        let mut doc = SvgDocument::new();
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        doc.append_child(a, b);
        doc.append_child(b, a);
        doc.append_child(a, a);

        assert_eq!(doc.parent(a), None);
        assert_eq!(doc.children(a), &[b]);
        assert_eq!(doc.serialize(a), "<a><b></b></a>");
    }

    #[test]
    fn provider_creates_empty_documents() {
        let mut doc = SvgDocumentProvider.create().expect("in-memory provider never fails");
        assert!(doc.is_empty());
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        assert_eq!(doc.len(), 2);
        assert_eq!((a.index(), b.index()), (0, 1));
    }
}
