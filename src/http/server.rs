//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build upstreams and the proxy table from the resolved configuration
//! - Create the Axum Router serving static assets
//! - Wire up middleware (request ID, tracing, timeout, body limit, hook)
//! - Dispatch proxied paths to their upstream
//! - Serve until shutdown is signalled

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::validation::join_errors;
use crate::config::{validate_resolved, ResolvedConfig, ServerConfig, ValidationError};
use crate::hooks::request_hook;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::proxy::{self, Upstream, UpstreamError};
use crate::routing::ProxyTable;

/// Error building the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid proxy configuration: {}", join_errors(.0))]
    Config(Vec<ValidationError>),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Application state injected into the proxy middleware.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<ProxyTable>,
    pub max_body_size: usize,
}

/// Development HTTP server.
pub struct DevServer {
    router: Router,
    config: Arc<ResolvedConfig>,
}

impl DevServer {
    /// Create a new server from a resolved configuration.
    pub fn new(config: ResolvedConfig) -> Result<Self, ServerError> {
        validate_resolved(&config).map_err(ServerError::Config)?;

        let upstreams = config
            .rules
            .iter()
            .cloned()
            .map(|rule| Upstream::new(rule, &config.timeouts))
            .collect::<Result<Vec<_>, _>>()?;

        for upstream in &upstreams {
            let rule = upstream.rule();
            tracing::info!(
                prefix = %rule.prefix,
                target = %rule.target,
                change_origin = rule.change_origin,
                secure = rule.secure,
                xfwd = rule.xfwd,
                "Proxy rule active"
            );
        }

        let state = AppState {
            table: Arc::new(ProxyTable::new(upstreams)),
            max_body_size: config.server.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ResolvedConfig, state: AppState) -> Router {
        Self::static_router(&config.server)
            .layer(middleware::from_fn_with_state(state, proxy_dispatch))
            .layer(middleware::from_fn(request_hook))
            .layer(RequestBodyLimitLayer::new(config.server.max_body_size))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::GATEWAY_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// Router serving the built front-end for every path not proxied.
    fn static_router(server: &ServerConfig) -> Router {
        let dir = Path::new(&server.static_dir);
        match &server.spa_fallback {
            Some(file) => Router::new()
                .fallback_service(ServeDir::new(dir).fallback(ServeFile::new(dir.join(file)))),
            None => Router::new().fallback_service(ServeDir::new(dir)),
        }
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            static_dir = %self.config.server.static_dir,
            "Dev server listening"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("Dev server stopped");
        Ok(())
    }

    /// The assembled router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Forward requests matching a proxy rule; pass everything else on.
async fn proxy_dispatch(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match state.table.match_path(request.uri().path()) {
        Some(route) => proxy::forward(&route.upstream, request, state.max_body_size)
            .await
            .into_response(),
        None => next.run(request).await,
    }
}
