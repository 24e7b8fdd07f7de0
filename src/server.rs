//! HTTP front end: `GET /?url=...` answers with the XML rendering of the
//! JSON resource at `url`.
//!
//! Every response, including errors, is an XML document so that consumers
//! such as spreadsheet import functions always get something parseable.

use crate::config::ServerConfig;
use crate::errors::BridgeError;
use crate::fetch::{FetchError, Fetcher};
use crate::formats::xml::{error_document, to_document};
use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{
        StatusCode,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
    routing::get,
};
use log::{info, warn};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

pub const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Shared state handed to every request.
#[derive(Debug)]
pub struct AppState {
    pub fetcher: Fetcher,
}

#[derive(Debug, Deserialize)]
pub struct BridgeQuery {
    pub url: Option<String>,
}

/// Request-level failures, each with a distinct HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing required query parameter 'url'")]
    MissingUrl,

    #[error("invalid query string: {0}")]
    InvalidQuery(#[from] QueryRejection),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Fetch(err) => match err {
                FetchError::InvalidUrl { .. } => StatusCode::BAD_REQUEST,
                FetchError::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                FetchError::UpstreamStatus(code) => StatusCode::from_u16(*code)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                FetchError::InvalidJson(_) => StatusCode::UNPROCESSABLE_ENTITY,
                FetchError::BodyTooLarge(_) | FetchError::Network(_) => StatusCode::BAD_GATEWAY,
                FetchError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        xml_response(status, error_document(status.as_u16(), &self.to_string()))
    }
}

fn xml_response(status: StatusCode, body: String) -> Response {
    (
        status,
        [
            (CONTENT_TYPE, XML_CONTENT_TYPE),
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (CACHE_CONTROL, "no-store"),
        ],
        body,
    )
        .into_response()
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(bridge_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn bridge_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<BridgeQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let url = query
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or(ApiError::MissingUrl)?;
    let start = Instant::now();

    let value = state.fetcher.fetch_json(&url).await.map_err(|e| {
        warn!("Request for {} failed: {}", url, e);
        ApiError::from(e)
    })?;
    let body = to_document(&value);

    info!(
        "Transcoded {} ({} bytes of XML, took {:.2?})",
        url,
        body.len(),
        start.elapsed()
    );
    Ok(xml_response(StatusCode::OK, body))
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Bind the listener and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), BridgeError> {
    let fetcher = Fetcher::new(config.fetch)?;
    let app = router(Arc::new(AppState { fetcher }));

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .map_err(|e| BridgeError::Io(e, format!("Failed to bind {}", config.listen)))?;
    let local = listener.local_addr()?;
    info!("Listening on http://{}", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BridgeError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
