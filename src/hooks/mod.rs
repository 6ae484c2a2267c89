//! Server request hook.
//!
//! Every request passes through [`handle`] before dispatch. The hook is the
//! place for cross-cutting request processing such as authentication or
//! session attachment. Authentication is disabled for now, so it forwards
//! the request untouched.
//!
//! # Design Decisions
//! - `handle` is a plain function of (event, resolve), so logic can be added
//!   later without changing how the pipeline invokes it
//! - The axum binding lives in [`request_hook`] and adds nothing of its own

use std::future::Future;

use axum::{body::Body, http::Request, middleware::Next, response::Response};

/// Pass `event` to `resolve` and return its output unchanged.
pub async fn handle<E, F, Fut>(event: E, resolve: F) -> Fut::Output
where
    F: FnOnce(E) -> Fut,
    Fut: Future,
{
    resolve(event).await
}

/// Middleware binding of [`handle`] for the axum pipeline.
pub async fn request_hook(request: Request<Body>, next: Next) -> Response {
    handle(request, |request| next.run(request)).await
}
