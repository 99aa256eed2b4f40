use axum::extract::rejection::PathRejection;
use axum::response::IntoResponse;
use thiserror::Error;
use tracing::warn;
use ui_snapshot::SnapshotError;

use crate::model::WireResponse;
use crate::status::WdStatus;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("no such session: {0}")]
    NoSuchSession(String),
    #[error("no such element: {0}")]
    NoSuchElement(String),
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("json decoder error: {detail}")]
    JsonDecode {
        session_id: Option<String>,
        detail: String,
    },
    #[error("session not created: {0}")]
    SessionNotCreated(String),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type BridgeResult<T> = Result<T, BridgeError>;

impl BridgeError {
    pub fn status(&self) -> WdStatus {
        match self {
            BridgeError::NoSuchSession(_) => WdStatus::NoSuchDriver,
            BridgeError::NoSuchElement(_) => WdStatus::NoSuchElement,
            BridgeError::UnknownCommand(_) => WdStatus::UnknownCommand,
            BridgeError::JsonDecode { .. } => WdStatus::JsonDecoderError,
            BridgeError::SessionNotCreated(_) => WdStatus::SessionNotCreated,
            BridgeError::Snapshot(_) | BridgeError::Internal(_) => WdStatus::UnknownError,
        }
    }

    pub fn session_id(&self) -> Option<String> {
        match self {
            BridgeError::NoSuchSession(id) => Some(id.clone()),
            BridgeError::JsonDecode { session_id, .. } => session_id.clone(),
            _ => None,
        }
    }
}

impl From<PathRejection> for BridgeError {
    fn from(rejection: PathRejection) -> Self {
        BridgeError::UnknownCommand(rejection.body_text())
    }
}

impl From<BridgeError> for WireResponse {
    fn from(err: BridgeError) -> Self {
        WireResponse::error(err.session_id(), err.status(), &err)
    }
}

// Every handler error ends up here, so clients always get a well-formed body.
impl IntoResponse for BridgeError {
    fn into_response(self) -> axum::response::Response {
        warn!(error = %self, status = self.status().code(), "wd bridge command failed");
        WireResponse::from(self).into_response()
    }
}
