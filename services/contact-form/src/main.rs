// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Form Service
//!
//! Serves `POST /api/contact` for the agency website.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables, optionally seeded
//! from a `.env` file:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `RATE_LIMIT_WINDOW_MS`: Window per source (default: 300000)
//! - `RESEND_API_KEY`: Email provider key (required)
//! - `CONTACT_EMAIL`: Operator inbox (required)
//! - `CONTACT_FROM`: Sender identity
//! - `RESEND_API_URL`: Provider base URL (default: https://api.resend.com)
//! - `EMAIL_TIMEOUT_SECS`: Provider request timeout (default: 10)
//! - `METRICS_ENABLED`: Expose the metrics endpoint (default: true)
//! - `METRICS_PATH`: Metrics endpoint path (default: /metrics)

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use contact_form::{
    config::Config,
    handlers::{router, AppState},
    limiter::RateLimiter,
    metrics::Metrics,
    notifier::NotificationDispatcher,
    service::ContactService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before tracing so RUST_LOG can come from .env
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    if let Err(err) = dotenv {
        if !err.not_found() {
            warn!(error = %err, "Failed to read .env file");
        }
    }

    let config = Config::from_env()?;
    info!(
        bind_addr = %config.bind_addr,
        window_ms = config.rate_limit.window_ms,
        api_url = %config.email.api_url,
        metrics = config.metrics.enabled,
        "Starting contact form service"
    );

    // Checked again, fatally, on first dispatch
    if let Err(err) = config.email.validate() {
        warn!(error = %err, "Email notifications will fail until configured");
    }

    let service = ContactService::new(
        RateLimiter::new(config.rate_limit.clone()),
        NotificationDispatcher::new(config.email.clone()),
        Metrics::new()?,
    );

    let state = Arc::new(AppState {
        service,
        config: config.clone(),
    });

    let app = router(state);

    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
