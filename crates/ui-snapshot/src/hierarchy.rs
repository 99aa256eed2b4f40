use std::sync::Arc;

use tracing::debug;

use crate::annotate::{annotate_document, InstanceCounter};
use crate::errors::SnapshotResult;
use crate::model::Document;
use crate::parser::parse_hierarchy;
use crate::ports::RawSnapshotSource;

/// Entry point for normalized snapshots of the live UI.
#[derive(Clone)]
pub struct XmlHierarchy {
    source: Arc<dyn RawSnapshotSource>,
}

impl XmlHierarchy {
    pub fn new(source: Arc<dyn RawSnapshotSource>) -> Self {
        Self { source }
    }

    /// Refreshes the active root, then dumps it.
    pub fn raw_hierarchy(&self) -> SnapshotResult<String> {
        self.source.refresh_active_root()?;
        self.source.window_hierarchy()
    }

    /// Fresh dump, parsed and annotated. Nothing is cached between calls.
    pub fn normalized_snapshot(&self) -> SnapshotResult<Document> {
        let raw = self.raw_hierarchy()?;
        format_xml_input(&raw)
    }
}

/// Parses a raw dump and annotates it with a fresh instance counter.
pub fn format_xml_input(raw: &str) -> SnapshotResult<Document> {
    let mut document = parse_hierarchy(raw)?;
    let mut instances = InstanceCounter::new();
    annotate_document(&mut document, &mut instances);
    debug!(classes = instances.len(), "annotated ui hierarchy");
    Ok(document)
}
