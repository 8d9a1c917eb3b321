// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Transactional email provider client.
//!
//! [`EmailProvider`] is the seam the notification dispatcher talks to.
//! [`ResendClient`] implements it against the Resend HTTP API.

use crate::config::{ConfigError, EmailConfig};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// An outbound email as the provider receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Provider-side failures. Never shown to end users.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Email provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Email provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

pub trait EmailProvider: Send + Sync + 'static {
    /// Deliver `message`. `Ok(None)` means the provider answered without a
    /// delivery identifier.
    fn send(
        &self,
        message: EmailMessage,
    ) -> impl Future<Output = Result<Option<String>, ProviderError>> + Send;
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Resend HTTP API client.
#[derive(Debug, Clone)]
pub struct ResendClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl ResendClient {
    /// Build a client from configuration. Fails when the API key or the
    /// operator inbox is missing.
    pub fn new(config: &EmailConfig) -> Result<Self, ProviderError> {
        config.validate()?;

        let mut base = config.api_base()?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join("emails").map_err(|_| ConfigError::InvalidValue {
            name: "RESEND_API_URL",
            value: config.api_url.clone(),
        })?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl EmailProvider for ResendClient {
    async fn send(&self, message: EmailMessage) -> Result<Option<String>, ProviderError> {
        debug!(endpoint = %self.endpoint, to = %message.to, "Sending email via Resend");

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let body: SendResponse = response.json().await?;
        Ok(body.id.filter(|id| !id.is_empty()))
    }
}
