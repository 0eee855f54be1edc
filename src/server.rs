//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Endpoint discovery and route registration
//! - Router configuration (catalog, settings, static frontend, fallbacks)
//! - Middleware stack (logging, compression, CORS)
//! - Graceful shutdown handling

use crate::config::GatewayConfig;
use crate::discovery::{self, Catalog, HandlerModule};
use crate::middleware::{log_requests, request_id};
use crate::registry::{self, ApiHandler, CallContext};
use crate::routes;
use crate::state::AppState;
use axum::Router;
use axum::extract::Request;
use axum::middleware::from_fn;
use axum::response::Response;
use axum::routing::{any, get};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the Axum router: gateway shell routes, one route per discovered
/// endpoint (all HTTP methods), and the static frontend as the fallback.
///
/// Middleware stack (applied in reverse order):
/// 1. Request ID tracking
/// 2. Request logging
/// 3. Compression
/// 4. CORS
pub fn build_router(state: Arc<AppState>, modules: Vec<HandlerModule>) -> Router {
    // CORS layer
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    let mut router = Router::new()
        .route("/endpoints", get(routes::catalog))
        .route("/set", get(routes::settings))
        .route("/health", get(routes::health));

    // Discovered endpoints answer under every HTTP method; the wrapper owns
    // exception safety so individual handlers do not have to.
    for module in modules {
        let handler = module.handler.clone();
        let route_state = state.clone();
        let wrapped = move |request: Request| {
            let handler = handler.clone();
            let state = route_state.clone();
            async move { dispatch(state, handler, request).await }
        };

        tracing::info!(
            route = %module.route,
            category = %module.meta.category,
            "registered endpoint"
        );
        router = router.route(&module.route, any(wrapped));
    }

    // Frontend bundle at the root; unresolved paths get the fixed 404 page
    let frontend = ServeDir::new(&state.config.ui_dir)
        .not_found_service(any(routes::not_found).with_state(state.clone()));

    router
        .fallback_service(frontend)
        .layer(CompressionLayer::new())
        .layer(cors)
        // request_id must wrap log_requests so the id is in scope when the
        // completion line is written
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run one endpoint handler, forwarding any failure to the central error
/// path instead of letting it poison the connection or the process.
async fn dispatch(state: Arc<AppState>, handler: Arc<dyn ApiHandler>, request: Request) -> Response {
    let cx = CallContext::new(&state, &request);
    match handler.handle(cx).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(path = %request.uri().path(), error = %err, "handler failed");
            state.error_pages.internal_error()
        }
    }
}

/// Start the gateway.
///
/// Discovery runs once, synchronously with startup, before the listener is
/// bound; afterwards the route table and catalog are immutable. This
/// function blocks until the server is shut down via SIGTERM or Ctrl+C.
pub async fn start_server(config: GatewayConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(config.log_level.as_str())
        .with_target(false)
        .init();

    // Discover endpoints and build the catalog
    let handlers = registry::builtin();
    let report = discovery::discover(Path::new(&config.api_dir), &handlers);
    let catalog = Catalog::build(&report.modules);

    // Create shared state and the router
    let state = Arc::new(AppState::new(config, catalog)?);
    let app = build_router(state.clone(), report.modules);

    let addr: SocketAddr = state.config.socket_addr()?;
    tracing::info!(
        "Serving {} endpoints on http://{}",
        state.catalog.count,
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
