use std::collections::HashMap;

use crate::model::{Document, Node, CLASS_ATTRIBUTE, INSTANCE_ATTRIBUTE};
use crate::tag_name::clean_tag_name;

/// Next free instance index per canonical tag. Lives for one traversal.
#[derive(Debug, Default)]
pub struct InstanceCounter {
    counts: HashMap<String, usize>,
}

impl InstanceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current index for `tag` and advances it.
    pub fn next(&mut self, tag: &str) -> usize {
        let slot = self.counts.entry(tag.to_string()).or_insert(0);
        let current = *slot;
        *slot += 1;
        current
    }

    pub fn count(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Renames every element after its `class` attribute and numbers it per
/// class, walking depth-first in document order. Elements without a class
/// keep their tag but their children are still visited.
pub fn annotate_document(document: &mut Document, instances: &mut InstanceCounter) {
    let mut pending = vec![document.root_mut()];
    while let Some(node) = pending.pop() {
        visit_node(node, instances);
        pending.extend(node.children_mut().iter_mut().rev());
    }
}

fn visit_node(node: &mut Node, instances: &mut InstanceCounter) {
    let Some(class) = node.attribute(CLASS_ATTRIBUTE) else {
        return;
    };
    let tag = clean_tag_name(class);
    let instance = instances.next(&tag);
    node.set_attribute(INSTANCE_ATTRIBUTE, instance.to_string());
    node.rename(tag);
}
