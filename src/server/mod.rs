//! HTTP API
//!
//! Every handler converts failures at the boundary into `{ "error": ... }`
//! with the status of the error's kind. Store access is synchronous and runs
//! on the blocking pool.

pub mod asset;
mod routes;

pub use routes::ListEntry;


use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use tokio::net::TcpListener;

use crate::config::Settings;
use crate::converter::Converter;
use crate::error::{Result, fs as fs_error, store};
use crate::store::BundleRepository;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub repo: BundleRepository,
    pub converter: Arc<Converter>,
}

impl AppState {
    pub fn new(repo: BundleRepository, converter: Converter) -> Self {
        Self {
            repo,
            converter: Arc::new(converter),
        }
    }
}

/// All routes, with request logging and an upload size limit
pub fn router(state: AppState, upload_limit_bytes: usize) -> Router {
    Router::new()
        .route("/convert", post(routes::convert))
        .route("/bundle/{id}", get(routes::bundle_assets))
        .route("/bundle/{id}/html", get(routes::bundle_html))
        .route("/bundle/{id}/package", get(routes::bundle_package))
        .route("/bundle/{id}/dimensions", get(routes::bundle_dimensions))
        .route("/save", post(routes::save))
        .route("/save-all", post(routes::save_all))
        .route("/list", get(routes::list))
        .route("/preview", get(routes::preview))
        .route("/preview/{session_id}/page", get(routes::preview_page))
        .route("/asset/{*path}", get(routes::asset))
        .route("/clear-output", post(routes::clear_output))
        .layer(DefaultBodyLimit::max(upload_limit_bytes))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(settings: &Settings, state: AppState) -> Result<()> {
    let addr = settings.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| fs_error::io_error(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, router(state, settings.upload_limit_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| fs_error::io_error(format!("Server failed: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(request).await;
    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis(),
        "request"
    );
    response
}

/// Run synchronous store work on the blocking pool
pub(crate) async fn blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| store::operation_failed(format!("background task failed: {e}")))?
}
