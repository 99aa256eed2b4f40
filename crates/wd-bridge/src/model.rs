use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::status::WdStatus;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireResponse {
    pub session_id: Option<String>,
    pub status: WdStatus,
    pub value: Value,
}

impl WireResponse {
    pub fn new(session_id: Option<String>, status: WdStatus, value: Value) -> Self {
        Self {
            session_id,
            status,
            value,
        }
    }

    pub fn success(session_id: Option<String>, value: impl Into<Value>) -> Self {
        Self::new(session_id, WdStatus::Success, value.into())
    }

    /// Error envelope carrying the status message and the underlying cause.
    pub fn error(session_id: Option<String>, status: WdStatus, detail: impl ToString) -> Self {
        Self::new(
            session_id,
            status,
            json!({
                "message": status.message(),
                "detail": detail.to_string(),
            }),
        )
    }
}

impl IntoResponse for WireResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status.http_status(), Json(self)).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionRequest {
    pub capabilities: Option<Value>,
    pub desired_capabilities: Option<Value>,
}

impl NewSessionRequest {
    /// W3C `alwaysMatch` wins over a flat `capabilities` object, which wins
    /// over legacy `desiredCapabilities`.
    pub fn effective_capabilities(&self) -> Value {
        if let Some(caps) = &self.capabilities {
            if let Some(always) = caps.get("alwaysMatch") {
                return always.clone();
            }
            if caps.get("firstMatch").is_none() {
                return caps.clone();
            }
        }
        self.desired_capabilities
            .clone()
            .unwrap_or_else(|| json!({}))
    }
}

/// Optional session id a client may attach to any request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHint {
    pub session_id: Option<String>,
}
