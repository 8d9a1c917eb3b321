// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Notification dispatcher.
//!
//! Renders a submission into the operator email and hands it to the
//! configured [`EmailProvider`]. Every field is sanitized again here
//! regardless of what the caller already did. Provider failures are logged
//! in full and collapsed into [`NotifyError::Send`].

use crate::config::{ConfigError, EmailConfig};
use crate::email::{EmailMessage, EmailProvider, ProviderError, ResendClient};
use crate::models::ContactSubmission;
use crate::sanitizer::sanitize;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to send notification")]
    Send,
}

type Connect<P> = fn(&EmailConfig) -> Result<P, ProviderError>;

/// Sends one email per accepted submission to the operator inbox.
pub struct NotificationDispatcher<P> {
    config: EmailConfig,
    provider: OnceCell<P>,
    connect: Option<Connect<P>>,
}

impl NotificationDispatcher<ResendClient> {
    /// Dispatcher backed by Resend, connected on first use.
    pub fn new(config: EmailConfig) -> Self {
        Self::lazy(config, ResendClient::new)
    }
}

impl<P: EmailProvider> NotificationDispatcher<P> {
    /// Create the provider with `connect` when the first notification goes out.
    pub fn lazy(config: EmailConfig, connect: Connect<P>) -> Self {
        Self {
            config,
            provider: OnceCell::new(),
            connect: Some(connect),
        }
    }

    /// Use an already constructed provider.
    pub fn with_provider(config: EmailConfig, provider: P) -> Self {
        Self {
            config,
            provider: OnceCell::new_with(Some(provider)),
            connect: None,
        }
    }

    /// Operator inbox, also shown to users as the fallback contact.
    pub fn contact_email(&self) -> &str {
        &self.config.contact_email
    }

    pub async fn send(&self, submission: &ContactSubmission) -> Result<(), NotifyError> {
        if let Err(err) = self.config.validate() {
            error!(error = %err, "Email configuration incomplete");
            return Err(err.into());
        }

        let provider = self.provider().await?;
        let message = self.compose(submission);

        match provider.send(message).await {
            Ok(Some(id)) => {
                info!(id = %id, "Contact notification sent");
                Ok(())
            }
            Ok(None) => {
                error!("Email provider response carried no delivery id");
                Err(NotifyError::Send)
            }
            Err(err) => {
                error!(error = %err, "Email provider request failed");
                Err(NotifyError::Send)
            }
        }
    }

    async fn provider(&self) -> Result<&P, NotifyError> {
        self.provider
            .get_or_try_init(|| async {
                let Some(connect) = self.connect else {
                    return Err(NotifyError::Send);
                };
                connect(&self.config).map_err(|err| {
                    error!(error = %err, "Failed to initialize email provider");
                    match err {
                        ProviderError::Config(err) => NotifyError::Config(err),
                        _ => NotifyError::Send,
                    }
                })
            })
            .await
    }

    /// Build the outbound email for `submission`.
    pub fn compose(&self, submission: &ContactSubmission) -> EmailMessage {
        let name = sanitize(&submission.name);
        let email = sanitize(&submission.email);
        let phone = submission
            .phone
            .as_deref()
            .map(sanitize)
            .filter(|phone| !phone.is_empty());
        let message = sanitize(&submission.message);

        EmailMessage {
            from: self.config.from.clone(),
            to: self.config.contact_email.clone(),
            subject: format!("New Contact Form Submission from {name}"),
            html: render_html(&name, &email, phone.as_deref(), &message),
        }
    }
}

const STYLE: &str = "\
body { font-family: Arial, sans-serif; line-height: 1.6; color: #333; }
.container { max-width: 600px; margin: 0 auto; padding: 20px; }
.field { margin-bottom: 15px; }
.label { font-weight: bold; color: #555; }
.value { margin-top: 5px; white-space: pre-wrap; }";

/// Inputs must already be sanitized.
fn render_html(name: &str, email: &str, phone: Option<&str>, message: &str) -> String {
    let mut fields = String::new();
    fields.push_str(&field("Name", name));
    fields.push_str(&field("Email", email));
    if let Some(phone) = phone {
        fields.push_str(&field("Phone", phone));
    }
    fields.push_str(&field("Message", message));

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n\
         <div class=\"container\">\n<h2>New Contact Form Submission</h2>\n{fields}</div>\n\
         </body>\n</html>\n"
    )
}

fn field(label: &str, value: &str) -> String {
    format!(
        "<div class=\"field\">\n<div class=\"label\">{label}:</div>\n\
         <div class=\"value\">{value}</div>\n</div>\n"
    )
}
