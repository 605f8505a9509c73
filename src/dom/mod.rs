//! Synthetic element tree used as the bundled scan host.
//!
//! The scanner itself only talks to the [`crate::scan::TargetElement`]
//! trait, so a browser host can forward matching to its own primitive. This
//! module provides the in-process implementation: a small arena of element
//! nodes that the `selectors` crate can match against, which is what makes
//! the core testable with synthetic documents and rule sets.

pub mod element_ref;

pub use element_ref::ElementRef;

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// An element: tag name plus the attributes selector matching cares about.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    inline_style: Option<String>,
}

impl ElementData {
    /// Create an element. Tag names are matched case-insensitively, as in
    /// HTML documents.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Space-separated class list, like a `class` attribute.
    pub fn with_classes(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_ascii_whitespace().map(str::to_string));
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// Raw `style` attribute text.
    pub fn with_inline_style(mut self, css: &str) -> Self {
        self.inline_style = Some(css.to_string());
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: ElementData,
}

/// A document as a flat arena of element nodes.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element under `parent` (or as a root when `None`).
    pub fn append(&mut self, parent: Option<NodeId>, data: ElementData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            data,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Borrow an element for matching and scanning.
    pub fn element(&self, id: NodeId) -> ElementRef<'_> {
        ElementRef::new(self, id)
    }

    pub(crate) fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].data.tag
    }

    pub(crate) fn element_id(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].data.id.as_deref()
    }

    pub(crate) fn classes(&self, id: NodeId) -> &[String] {
        &self.nodes[id.0].data.classes
    }

    pub(crate) fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0]
            .data
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub(crate) fn attrs(&self, id: NodeId) -> &[(String, String)] {
        &self.nodes[id.0].data.attrs
    }

    pub(crate) fn inline_style(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].data.inline_style.as_deref()
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub(crate) fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].children.first().copied()
    }

    pub(crate) fn has_children(&self, id: NodeId) -> bool {
        !self.nodes[id.0].children.is_empty()
    }

    /// Sibling immediately before/after `id` among its parent's children.
    pub(crate) fn sibling(&self, id: NodeId, offset: isize) -> Option<NodeId> {
        let parent = self.nodes[id.0].parent?;
        let siblings = &self.nodes[parent.0].children;
        let index = siblings.iter().position(|&c| c == id)?;
        let target = index.checked_add_signed(offset)?;
        siblings.get(target).copied()
    }
}
