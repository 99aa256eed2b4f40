use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;
use ui_snapshot::XmlHierarchy;

use crate::driver::{LocalSessionDriver, SessionDriver};
use crate::handlers;
use crate::model::WireResponse;
use crate::state::SessionStore;
use crate::status::WdStatus;
use crate::trace::BridgeTracer;

#[derive(Clone)]
pub struct WebDriverBridge {
    state: Arc<SessionStore>,
    tracer: BridgeTracer,
    driver: Arc<dyn SessionDriver>,
    hierarchy: XmlHierarchy,
}

impl WebDriverBridge {
    pub fn new(hierarchy: XmlHierarchy) -> Self {
        let state = Arc::new(SessionStore::default());
        Self {
            driver: Arc::new(LocalSessionDriver::new(Arc::clone(&state))),
            state,
            tracer: BridgeTracer::default(),
            hierarchy,
        }
    }

    pub fn with_tracer(mut self, tracer: BridgeTracer) -> Self {
        self.tracer = tracer;
        self
    }

    /// Custom drivers must record their sessions in [`Self::sessions`] for
    /// the session-scoped routes to find them.
    pub fn with_driver(mut self, driver: Arc<dyn SessionDriver>) -> Self {
        self.driver = driver;
        self
    }

    pub fn sessions(&self) -> Arc<SessionStore> {
        Arc::clone(&self.state)
    }

    pub fn build(self) -> Router {
        Router::new()
            .route("/status", get(handlers::status))
            .route("/session", post(handlers::create_session))
            .route(
                "/session/:id",
                get(handlers::get_session).delete(handlers::delete_session),
            )
            .route("/session/:id/source", get(handlers::page_source))
            .route(
                "/session/:id/locate/:tag/:instance",
                get(handlers::locate),
            )
            .method_not_allowed_fallback(handlers::unknown_command)
            .fallback(handlers::unknown_command)
            .layer(CatchPanicLayer::custom(panic_response))
            .with_state(handlers::BridgeCtx {
                state: self.state,
                driver: self.driver,
                hierarchy: self.hierarchy,
                tracer: self.tracer,
            })
    }
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "handler panicked".to_string()
    };
    error!(%detail, "wd bridge handler panicked");
    WireResponse::error(None, WdStatus::UnknownError, detail).into_response()
}
