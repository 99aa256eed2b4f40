use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot unavailable: {0}")]
    SnapshotUnavailable(String),
    #[error("could not read xml hierarchy: {detail}")]
    MalformedSnapshot { detail: String },
    #[error("could not serialize xml hierarchy: {0}")]
    Serialization(String),
}

impl SnapshotError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::SnapshotUnavailable(msg.into())
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedSnapshot {
            detail: detail.into(),
        }
    }
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;
