//! HTTP server wiring for snipbin (router, handlers, shared state).

/// HTTP error mapping for API handlers.
pub mod error;
/// HTTP handlers for paste endpoints.
pub mod handlers;

pub use snipbin_core::{
    config, constants, AppError, Config, MemoryStore, PasteService, PasteStore, RateLimiter,
    RedbStore, StoreBackend, DEFAULT_PORT,
};

use axum::{
    extract::DefaultBodyLimit,
    http::header,
    routing::{get, post},
    Router,
};
use hyper::HeaderMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PasteService>,
    pub limiter: Arc<RateLimiter>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Construct shared application state around an opened store.
    pub fn new(config: Config, store: Arc<dyn PasteStore>) -> Self {
        let limiter = Arc::new(RateLimiter::new());
        Self::with_limiter(config, store, limiter)
    }

    /// Construct shared application state with a pre-configured limiter.
    ///
    /// Integration tests use this to tighten or observe quotas.
    pub fn with_limiter(
        config: Config,
        store: Arc<dyn PasteStore>,
        limiter: Arc<RateLimiter>,
    ) -> Self {
        let service = Arc::new(PasteService::new(store, config.max_content_chars));
        Self {
            service,
            limiter,
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware.
///
/// # Panics
/// Panics if static header values fail to parse (should not happen).
pub fn create_app(state: AppState) -> Router {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(header::X_CONTENT_TYPE_OPTIONS, "nosniff".parse().unwrap());
    default_headers.insert(header::X_FRAME_OPTIONS, "SAMEORIGIN".parse().unwrap());

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    // The body ceiling sits above the content ceiling to leave room for
    // the JSON envelope and UTF-8/escape overhead; the service enforces
    // the exact character limit.
    let body_limit = state
        .config
        .max_content_chars
        .saturating_mul(4)
        .saturating_add(1024);

    Router::new()
        .route("/api/paste", post(handlers::paste::create_paste))
        .route(
            "/api/paste/:id",
            get(handlers::paste::get_paste).delete(handlers::paste::delete_paste),
        )
        .route("/api/paste/:id/raw", get(handlers::paste::get_paste_raw))
        .with_state(state)
        .layer(
            tower::ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    default_headers
                        .get(header::X_CONTENT_TYPE_OPTIONS)
                        .unwrap()
                        .clone(),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    default_headers.get(header::X_FRAME_OPTIONS).unwrap().clone(),
                )),
        )
}

/// Resolve the listener address from env var overrides and security policy.
///
/// # Returns
/// A validated socket address that enforces loopback when public access
/// is disabled.
pub fn resolve_bind_address(config: &Config, allow_public_access: bool) -> SocketAddr {
    let default_bind = SocketAddr::from(([127, 0, 0, 1], config.port));
    let requested = match std::env::var("BIND") {
        Ok(value) => match value.trim().parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(err) => {
                tracing::warn!(
                    "Invalid BIND='{}': {}. Falling back to {}",
                    value,
                    err,
                    default_bind
                );
                default_bind
            }
        },
        Err(_) => default_bind,
    };

    if allow_public_access || requested.ip().is_loopback() {
        return requested;
    }

    tracing::warn!(
        "Non-loopback bind {} requested without ALLOW_PUBLIC_ACCESS; forcing 127.0.0.1",
        requested
    );
    SocketAddr::from(([127, 0, 0, 1], requested.port()))
}

/// Spawn the periodic expiry sweep for the in-memory backend.
///
/// Runs until the process exits; the durable backend relies on lazy
/// expiry plus its startup purge instead.
pub fn spawn_expiry_sweep(store: Arc<dyn PasteStore>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let period = Duration::from_secs(constants::SWEEP_INTERVAL_SECS);
        let mut ticker = tokio::time::interval(period);
        // The first tick fires immediately; skip it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match store.purge_expired() {
                Ok(0) => {}
                Ok(purged) => tracing::debug!("Expiry sweep evicted {} pastes", purged),
                Err(err) => tracing::warn!("Expiry sweep failed: {}", err),
            }
        }
    })
}

/// Run the axum server with graceful shutdown support.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = create_app(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}
