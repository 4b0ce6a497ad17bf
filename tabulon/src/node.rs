//! Output node tree built by the widgets.
//!
//! Rendering produces an explicit tree of [`Node`]s instead of live DOM:
//! interaction targets are addressed by node id, presentation hooks are
//! carried as classes and data attributes, and visibility is a plain flag.

use std::collections::BTreeMap;

/// The vocabulary of nodes the widgets emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Table,
    Caption,
    HeaderRow,
    HeaderCell,
    Row,
    Cell,
    Toggle,
    Button,
    Pre,
    Tabs,
    TabBar,
    TabButton,
    TabPane,
}

/// One node in the built tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub classes: Vec<String>,
    /// Data attributes: raw type/value strings for CSS alignment and
    /// external handlers.
    pub data: BTreeMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<Node>,
    pub hidden: bool,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: String::new(),
            kind,
            classes: Vec::new(),
            data: BTreeMap::new(),
            text: None,
            children: Vec::new(),
            hidden: false,
        }
    }

    /// A node of the given kind with text content.
    pub fn text_node(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(kind)
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn classes(mut self, classes: impl IntoIterator<Item = String>) -> Self {
        self.classes.extend(classes);
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

/// Find a node by ID in the tree.
pub fn find_node<'a>(root: &'a Node, id: &str) -> Option<&'a Node> {
    if root.id == id {
        return Some(root);
    }
    for child in &root.children {
        if let Some(found) = find_node(child, id) {
            return Some(found);
        }
    }
    None
}

/// Collect the visible text content of a subtree.
pub fn collect_text(node: &Node) -> String {
    if node.hidden {
        return String::new();
    }
    let mut out = node.text.clone().unwrap_or_default();
    for child in &node.children {
        out.push_str(&collect_text(child));
    }
    out
}
