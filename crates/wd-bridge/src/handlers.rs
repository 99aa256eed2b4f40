use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::Uri;
use serde_json::{json, Map, Value};
use tracing::{debug, error, info, Instrument};
use ui_snapshot::{Document, Locator, XmlHierarchy};

use crate::driver::{DriverError, SessionDriver};
use crate::errors::{BridgeError, BridgeResult};
use crate::extract::WdPath;
use crate::model::{NewSessionRequest, SessionHint, WireResponse};
use crate::state::SessionStore;
use crate::status::WdStatus;
use crate::trace::BridgeTracer;

#[derive(Clone)]
pub struct BridgeCtx {
    pub state: Arc<SessionStore>,
    pub driver: Arc<dyn SessionDriver>,
    pub hierarchy: XmlHierarchy,
    pub tracer: BridgeTracer,
}

pub async fn status() -> WireResponse {
    WireResponse::success(
        None,
        json!({
            "ready": true,
            "message": "ui hierarchy bridge ready"
        }),
    )
}

pub async fn create_session(
    State(ctx): State<BridgeCtx>,
    hint: Result<Query<SessionHint>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> BridgeResult<WireResponse> {
    let span = ctx.tracer.span("create_session");
    async move {
        let hint = match hint {
            Ok(Query(hint)) => hint,
            Err(rejection) => {
                return Ok(decode_failure(None, rejection.body_text()));
            }
        };
        let body = match body {
            Ok(body) => body,
            Err(rejection) => {
                return Ok(decode_failure(hint.session_id, rejection.body_text()));
            }
        };
        let request: NewSessionRequest = match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(err) => return Ok(decode_failure(hint.session_id, err)),
        };

        match ctx
            .driver
            .initialize_session(request.effective_capabilities())
            .await
        {
            Ok(session_id) => {
                info!(%session_id, "created session");
                Ok(WireResponse::success(Some(session_id), "Created Session"))
            }
            Err(DriverError::Decode(detail)) => Ok(decode_failure(hint.session_id, detail)),
            Err(DriverError::NotCreated(detail)) => Err(BridgeError::SessionNotCreated(detail)),
        }
    }
    .instrument(span)
    .await
}

pub async fn get_session(
    State(ctx): State<BridgeCtx>,
    WdPath(session_id): WdPath<String>,
) -> BridgeResult<WireResponse> {
    let session = ctx
        .state
        .get(&session_id)
        .ok_or_else(|| BridgeError::NoSuchSession(session_id.clone()))?;
    Ok(WireResponse::success(Some(session_id), session.capabilities))
}

pub async fn delete_session(
    State(ctx): State<BridgeCtx>,
    WdPath(session_id): WdPath<String>,
) -> BridgeResult<WireResponse> {
    ctx.state
        .remove(&session_id)
        .ok_or_else(|| BridgeError::NoSuchSession(session_id.clone()))?;
    info!(%session_id, "deleted session");
    Ok(WireResponse::success(Some(session_id), Value::Null))
}

pub async fn page_source(
    State(ctx): State<BridgeCtx>,
    WdPath(session_id): WdPath<String>,
) -> BridgeResult<WireResponse> {
    ensure_session(&ctx, &session_id)?;
    let span = ctx.tracer.span("page_source");
    let document = normalized_snapshot(&ctx).instrument(span).await?;
    let xml = document.to_xml_string()?;
    Ok(WireResponse::success(Some(session_id), xml))
}

pub async fn locate(
    State(ctx): State<BridgeCtx>,
    WdPath((session_id, tag, instance)): WdPath<(String, String, usize)>,
) -> BridgeResult<WireResponse> {
    ensure_session(&ctx, &session_id)?;
    let locator = Locator::new(tag, instance);
    let span = ctx.tracer.span("locate");
    let document = normalized_snapshot(&ctx).instrument(span).await?;
    let node = document
        .find(&locator)
        .ok_or_else(|| BridgeError::NoSuchElement(locator.to_xpath()))?;

    let attributes: Map<String, Value> = node
        .attributes()
        .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
        .collect();

    Ok(WireResponse::success(
        Some(session_id),
        json!({
            "tag": node.tag(),
            "instance": locator.instance,
            "xpath": locator.to_xpath(),
            "attributes": attributes,
            "childCount": node.children().len(),
        }),
    ))
}

pub async fn unknown_command(uri: Uri) -> WireResponse {
    debug!(%uri, "unknown command");
    WireResponse::error(None, WdStatus::UnknownCommand, uri)
}

fn decode_failure(session_id: Option<String>, detail: impl std::fmt::Display) -> WireResponse {
    error!(%detail, "exception while reading json");
    WireResponse::error(session_id, WdStatus::JsonDecoderError, detail)
}

fn ensure_session(ctx: &BridgeCtx, session_id: &str) -> BridgeResult<()> {
    if ctx.state.contains(session_id) {
        Ok(())
    } else {
        Err(BridgeError::NoSuchSession(session_id.to_string()))
    }
}

// The source may shell out, so keep it off the async workers.
async fn normalized_snapshot(ctx: &BridgeCtx) -> BridgeResult<Document> {
    let hierarchy = ctx.hierarchy.clone();
    let document = tokio::task::spawn_blocking(move || hierarchy.normalized_snapshot())
        .await
        .map_err(|err| BridgeError::Internal(format!("snapshot task failed: {err}")))??;
    Ok(document)
}
