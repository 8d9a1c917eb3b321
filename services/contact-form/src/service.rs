// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact submission pipeline.
//!
//! rate limit -> honeypot -> validate -> sanitize -> notify, stopping at the
//! first stage that fails. Expected rejections and faults are both variants
//! of [`SubmissionError`]; the HTTP layer decides how each is presented.

use crate::email::EmailProvider;
use crate::honeypot;
use crate::limiter::{RateLimitResult, RateLimiter};
use crate::metrics::{Metrics, Outcome};
use crate::models::FieldErrors;
use crate::notifier::{NotificationDispatcher, NotifyError};
use crate::sanitizer::sanitize;
use crate::validator;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("source is rate limited for another {retry_after:?}")]
    Throttled { retry_after: Duration },

    #[error("honeypot field populated")]
    BotDetected,

    #[error("submission failed validation")]
    Invalid(FieldErrors),

    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}

impl SubmissionError {
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Throttled { .. } => Outcome::Throttled,
            Self::BotDetected => Outcome::BotDetected,
            Self::Invalid(_) => Outcome::Invalid,
            Self::MalformedBody(_) | Self::Notify(_) => Outcome::Failed,
        }
    }
}

/// Owns every piece of state the pipeline needs.
pub struct ContactService<P> {
    limiter: RateLimiter,
    notifier: NotificationDispatcher<P>,
    metrics: Metrics,
}

impl<P: EmailProvider> ContactService<P> {
    pub fn new(limiter: RateLimiter, notifier: NotificationDispatcher<P>, metrics: Metrics) -> Self {
        Self {
            limiter,
            notifier,
            metrics,
        }
    }

    /// Run one submission from `source` with raw JSON `body` through the
    /// pipeline.
    pub async fn submit(&self, source: &str, body: &[u8]) -> Result<(), SubmissionError> {
        let result = self.process(source, body).await;

        match &result {
            Ok(()) => {
                info!(source, "Contact submission accepted");
                self.metrics.record(Outcome::Accepted);
            }
            Err(err) => {
                match err {
                    SubmissionError::MalformedBody(_) | SubmissionError::Notify(_) => {
                        warn!(source, error = %err, "Contact submission failed")
                    }
                    _ => info!(source, reason = %err, "Contact submission rejected"),
                }
                self.metrics.record(err.outcome());
            }
        }

        result
    }

    async fn process(&self, source: &str, body: &[u8]) -> Result<(), SubmissionError> {
        let payload: Value = serde_json::from_slice(body)?;

        if let RateLimitResult::Limited { retry_after } = self.limiter.check(source).await {
            return Err(SubmissionError::Throttled { retry_after });
        }
        self.metrics
            .set_tracked_sources(self.limiter.tracked_sources().await);

        if honeypot::is_tripped(&payload) {
            return Err(SubmissionError::BotDetected);
        }

        let mut submission = validator::validate(&payload).map_err(SubmissionError::Invalid)?;
        submission.message = sanitize(&submission.message);
        debug!(source, "Dispatching contact notification");

        self.notifier.send(&submission).await?;
        Ok(())
    }

    /// Fallback address shown to users when delivery fails.
    pub fn contact_email(&self) -> &str {
        self.notifier.contact_email()
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
