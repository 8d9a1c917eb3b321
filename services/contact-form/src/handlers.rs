// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the contact form service.
//!
//! Maps pipeline outcomes onto status codes and the shared
//! `{success, message?, error?, details?}` envelope. Internal error detail
//! never reaches the response body.

use crate::config::Config;
use crate::email::EmailProvider;
use crate::limiter::UNKNOWN_SOURCE;
use crate::models::ApiResponse;
use crate::service::{ContactService, SubmissionError};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

pub const THANK_YOU: &str = "Thank you! We'll respond within 24 hours.";
pub const TOO_MANY_REQUESTS: &str = "Too many requests. Please try again in a few minutes.";
pub const INVALID_SUBMISSION: &str = "Invalid submission";
pub const VALIDATION_FAILED: &str = "Validation failed";

/// Header carrying the client address chain set by the hosting proxy.
pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// Shared application state.
pub struct AppState<P> {
    pub service: ContactService<P>,
    pub config: Config,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Build the service router.
pub fn router<P: EmailProvider>(state: Arc<AppState<P>>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/api/contact", post(submit_contact::<P>));

    if state.config.metrics.enabled {
        router = router.route(&state.config.metrics.path, get(metrics::<P>));
    }

    let fallback_email = state.service.contact_email().to_string();
    router
        .layer(CatchPanicLayer::custom(
            move |_: Box<dyn Any + Send + 'static>| -> Response {
                error!("Handler panicked");
                internal_error(&fallback_email)
            },
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "contact-form",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Accept a contact form submission.
pub async fn submit_contact<P: EmailProvider>(
    State(state): State<Arc<AppState<P>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let source = source_identifier(&headers);

    match state.service.submit(&source, &body).await {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::ok(THANK_YOU))).into_response(),
        Err(err) => error_response(err, state.service.contact_email()),
    }
}

/// Prometheus scrape endpoint.
pub async fn metrics<P: EmailProvider>(State(state): State<Arc<AppState<P>>>) -> Response {
    match state.service.metrics().render() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "Failed to render metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// First address of the forwarded-for chain, or `"unknown"`.
///
/// The header is client-controlled unless a trusted proxy overwrites it.
pub fn source_identifier(headers: &HeaderMap) -> String {
    headers
        .get(FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_SOURCE)
        .to_string()
}

fn error_response(err: SubmissionError, contact_email: &str) -> Response {
    match err {
        SubmissionError::Throttled { retry_after } => {
            let retry_secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_secs.to_string())],
                Json(ApiResponse::error(TOO_MANY_REQUESTS)),
            )
                .into_response()
        }
        SubmissionError::BotDetected => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(INVALID_SUBMISSION)),
        )
            .into_response(),
        SubmissionError::Invalid(details) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(VALIDATION_FAILED).with_details(details)),
        )
            .into_response(),
        SubmissionError::MalformedBody(_) | SubmissionError::Notify(_) => {
            internal_error(contact_email)
        }
    }
}

fn internal_error(contact_email: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(format!(
            "Something went wrong. Please try emailing us directly at {contact_email}"
        ))),
    )
        .into_response()
}
