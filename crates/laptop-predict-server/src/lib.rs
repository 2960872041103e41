//! HTTP surface for the laptop spec score and price models.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod services;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::InvalidHeaderValue;
use axum::http::{HeaderValue, Request, Response};
use axum::routing::post;
use axum::Router;
use laptop_predict_core::ModelStore;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct ServerState {
    pub models: ModelStore,
}

impl ServerState {
    pub fn new(models: ModelStore) -> Self {
        Self { models }
    }
}

/// Allows exactly one origin with credentials. Other origins get no
/// `access-control-allow-origin`. Methods and headers are mirrored from the
/// preflight since browsers refuse `*` with credentials.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = HeaderValue::from_str(allowed_origin)?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

/// Builds the router with both prediction routes.
pub fn app(state: Arc<ServerState>, cors: CorsLayer) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    Router::new()
        .route("/predict/spec_score", post(handlers::predict::spec_score))
        .route("/predict/price", post(handlers::predict::price))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

/// Serves `app` until `shutdown` resolves, then drains in-flight requests.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
