//! Arena-based XML tree.
//!
//! All nodes live in a contiguous vector and link to each other by index.
//! Detached nodes stay allocated but become unreachable from the document
//! root, so ids held by a caller never dangle.

use crate::error::{Error, Result};

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value for no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Element with qualified name and attributes in source order.
    Element {
        /// Qualified name as written, e.g. `rect` or `svg:rect`.
        name: String,
        /// Resolved namespace URI (empty when none is in scope).
        namespace: String,
        attrs: Vec<Attribute>,
    },
    /// Character data, kept in its escaped source form.
    Text(String),
    /// `<![CDATA[...]]>` section.
    CData(String),
    Comment(String),
    /// Processing instruction body, e.g. `xml-stylesheet href="a.css"`.
    ProcessingInstruction(String),
    /// XML declaration body, e.g. `xml version="1.0"`.
    Declaration(String),
    /// Document type declaration body.
    Doctype(String),
}

/// Element attribute. The value is stored unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A node in the arena.
#[derive(Debug)]
pub struct Node {
    pub data: NodeData,
    pub parent: NodeId,
    pub first_child: NodeId,
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
        }
    }
}

/// Arena-based document tree.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    document: NodeId,
}

impl Document {
    /// Create a new empty tree with a document root.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            document: NodeId::NONE,
        };
        doc.document = doc.alloc(Node::new(NodeData::Document));
        doc
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the document root ID.
    pub fn document(&self) -> NodeId {
        self.document
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Create a new, unattached element node.
    pub fn create_element(
        &mut self,
        name: impl Into<String>,
        namespace: impl Into<String>,
        attrs: Vec<Attribute>,
    ) -> NodeId {
        self.alloc(Node::new(NodeData::Element {
            name: name.into(),
            namespace: namespace.into(),
            attrs,
        }))
    }

    /// Create a new, unattached non-element node.
    pub fn create_node(&mut self, data: NodeData) -> NodeId {
        self.alloc(Node::new(data))
    }

    /// Append a child to a parent node.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
            child_node.next_sibling = NodeId::NONE;
        }

        if last_child.is_some() {
            if let Some(last_node) = self.get_mut(last_child) {
                last_node.next_sibling = child;
            }
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Append raw text, merging into the last child when it is already text.
    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(NodeId::NONE);

        if let Some(last) = self.get_mut(last_child) {
            if let NodeData::Text(ref mut existing) = last.data {
                existing.push_str(text);
                return;
            }
        }

        let text_node = self.create_node(NodeData::Text(text.to_string()));
        self.append(parent, text_node);
    }

    /// Unlink a node (and its subtree) from its parent.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = next;
        }

        if next.is_some() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildrenIter<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(NodeId::NONE);
        ChildrenIter {
            doc: self,
            current: first,
        }
    }

    /// All elements reachable from the document root, in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.document];
        while let Some(id) = stack.pop() {
            if self.is_element(id) {
                out.push(id);
            }
            // Push children in reverse order for left-to-right traversal
            let mut children: Vec<_> = self.children(id).collect();
            children.reverse();
            stack.extend(children);
        }
        out
    }

    /// The single top-level element, if any.
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(self.document).find(|&id| self.is_element(id))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    doc: &'a Document,
    current: NodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .doc
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(id)
    }
}

/// Convenience methods for element nodes.
impl Document {
    /// Element's qualified name.
    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }

    /// Element's local name (the part after any prefix).
    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        self.element_name(id)
            .map(|name| name.rsplit_once(':').map_or(name, |(_, local)| local))
    }

    /// Element's resolved namespace URI.
    pub fn element_namespace(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { namespace, .. } => Some(namespace.as_str()),
            _ => None,
        })
    }

    /// Element's attributes in source order.
    pub fn attrs(&self, id: NodeId) -> &[Attribute] {
        static EMPTY: &[Attribute] = &[];
        self.get(id)
            .and_then(|n| match &n.data {
                NodeData::Element { attrs, .. } => Some(attrs.as_slice()),
                _ => None,
            })
            .unwrap_or(EMPTY)
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.attrs(id)
            .iter()
            .find(|a| a.name == attr_name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, id: NodeId, attr_name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(NodeData::Element { attrs, .. }) = self.get_mut(id).map(|n| &mut n.data) {
            match attrs.iter_mut().find(|a| a.name == attr_name) {
                Some(attr) => attr.value = value,
                None => attrs.push(Attribute {
                    name: attr_name.to_string(),
                    value,
                }),
            }
        }
    }

    /// Remove an attribute, returning its old value.
    pub fn remove_attr(&mut self, id: NodeId, attr_name: &str) -> Option<String> {
        if let Some(NodeData::Element { attrs, .. }) = self.get_mut(id).map(|n| &mut n.data) {
            let pos = attrs.iter().position(|a| a.name == attr_name)?;
            return Some(attrs.remove(pos).value);
        }
        None
    }

    /// Check if node is an element.
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, NodeData::Element { .. }))
    }

    /// Concatenated character data of a subtree, unescaped.
    ///
    /// Fails when a text node holds an entity reference XML does not define.
    pub fn text_content(&self, id: NodeId) -> Result<String> {
        let mut out = String::new();
        self.collect_text(id, &mut out)?;
        Ok(out)
    }

    fn collect_text(&self, id: NodeId, out: &mut String) -> Result<()> {
        for child in self.children(id) {
            match self.get(child).map(|n| &n.data) {
                Some(NodeData::Text(raw)) => {
                    let text = quick_xml::escape::unescape(raw)
                        .map_err(|e| Error::InvalidEntity(e.to_string()))?;
                    out.push_str(&text);
                }
                Some(NodeData::CData(text)) => out.push_str(text),
                Some(NodeData::Element { .. }) => self.collect_text(child, out)?,
                _ => {}
            }
        }
        Ok(())
    }
}
