use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::state::SessionStore;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("invalid capabilities: {0}")]
    Decode(String),
    #[error("{0}")]
    NotCreated(String),
}

/// Creates automation sessions for the bridge.
#[async_trait]
pub trait SessionDriver: Send + Sync {
    async fn initialize_session(&self, capabilities: Value) -> Result<String, DriverError>;
}

/// One session at a time; a new session replaces whatever was active.
pub struct LocalSessionDriver {
    store: Arc<SessionStore>,
}

impl LocalSessionDriver {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionDriver for LocalSessionDriver {
    async fn initialize_session(&self, capabilities: Value) -> Result<String, DriverError> {
        if !capabilities.is_object() {
            return Err(DriverError::Decode(
                "capabilities must be a JSON object".into(),
            ));
        }
        let replaced = self.store.clear();
        if !replaced.is_empty() {
            info!(?replaced, "replacing active session");
        }
        let session = self.store.create(capabilities);
        Ok(session.session_id)
    }
}
