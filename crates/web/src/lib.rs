//! Helpdesk web application library.
//!
//! Users log in, then create and list support tickets. What a user may see
//! depends on their role:
//!
//! - `ADMIN` sees every ticket
//! - `AGENT` sees tickets assigned to them and unassigned tickets
//! - `USER` sees tickets they created
//!
//! The binary in `main.rs` wires this library to `PostgreSQL`, Sentry and a
//! TCP listener; tests drive [`app`] directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions::SessionStore;
use tower_sessions::cookie::KeyError;
use tracing::Span;

use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Build the application with its session and tracing layers.
///
/// # Errors
///
/// Returns `KeyError` if the session secret cannot be used as a signing key.
pub fn app<S>(state: AppState, session_store: S) -> Result<Router, KeyError>
where
    S: SessionStore + Clone,
{
    let session_layer = create_session_layer(session_store, state.config())?;

    Ok(routes::routes()
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri().path(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state))
}
