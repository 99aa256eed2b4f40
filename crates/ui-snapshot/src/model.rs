use serde::{Deserialize, Serialize};

use crate::sanitize::sanitize;

pub const CLASS_ATTRIBUTE: &str = "class";
pub const INSTANCE_ATTRIBUTE: &str = "instance";

/// One element of a UI hierarchy.
///
/// The tag is an ordinary field. Annotation renames it in place, so anything
/// reading the tag afterwards sees the canonical name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
    text: Option<String>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: impl AsRef<str>) -> Self {
        self.push_text(text.as_ref());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn rename(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Values are sanitized before storing. An existing attribute keeps its
    /// position, a new one is appended.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl AsRef<str>) {
        let name = name.into();
        let value = sanitize(value.as_ref()).into_owned();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Parsed `instance` attribute, if annotation assigned one.
    pub fn instance(&self) -> Option<usize> {
        self.attribute(INSTANCE_ATTRIBUTE)?.parse().ok()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub(crate) fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        let text = sanitize(text);
        match self.text.as_mut() {
            Some(existing) => existing.push_str(&text),
            None => self.text = Some(text.into_owned()),
        }
    }

    /// Pre-order walk starting with `self`; siblings keep document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

// Flattens the subtree before dropping so depth never reaches the call stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut child) = pending.pop() {
            pending.append(&mut child.children);
        }
    }
}

/// A parsed hierarchy. Built fresh for every snapshot and handed out by value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    root: Node,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    pub fn nodes(&self) -> Descendants<'_> {
        self.root.descendants()
    }

    pub fn find(&self, locator: &Locator) -> Option<&Node> {
        self.nodes()
            .find(|node| node.tag() == locator.tag && node.instance() == Some(locator.instance))
    }

    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes().filter(move |node| node.tag() == tag)
    }
}

/// `(tag, instance)` address of an annotated node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    pub tag: String,
    pub instance: usize,
}

impl Locator {
    pub fn new(tag: impl Into<String>, instance: usize) -> Self {
        Self {
            tag: tag.into(),
            instance,
        }
    }

    pub fn to_xpath(&self) -> String {
        format!("//{}[@{}=\"{}\"]", self.tag, INSTANCE_ATTRIBUTE, self.instance)
    }
}
