use crate::errors::SnapshotResult;

/// Produces textual dumps of the live UI hierarchy.
pub trait RawSnapshotSource: Send + Sync {
    /// Re-acquires the active window root before a dump. Sources without a
    /// cached root keep the default.
    fn refresh_active_root(&self) -> SnapshotResult<()> {
        Ok(())
    }

    fn window_hierarchy(&self) -> SnapshotResult<String>;
}

/// Serves a fixed dump, for replays and tests.
#[derive(Clone, Debug)]
pub struct StaticSource {
    xml: String,
}

impl StaticSource {
    pub fn new(xml: impl Into<String>) -> Self {
        Self { xml: xml.into() }
    }
}

impl RawSnapshotSource for StaticSource {
    fn window_hierarchy(&self) -> SnapshotResult<String> {
        Ok(self.xml.clone())
    }
}
