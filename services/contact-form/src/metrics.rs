// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus metrics for contact submissions.

use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Terminal state of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Accepted,
    Throttled,
    BotDetected,
    Invalid,
    Failed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Throttled => "throttled",
            Self::BotDetected => "bot",
            Self::Invalid => "invalid",
            Self::Failed => "failed",
        }
    }
}

/// Metrics owned by one service instance.
pub struct Metrics {
    registry: Registry,
    submissions: IntCounterVec,
    tracked_sources: IntGauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let submissions = IntCounterVec::new(
            Opts::new("contact_submissions_total", "Contact form submissions by outcome"),
            &["outcome"],
        )?;
        let tracked_sources = IntGauge::new(
            "contact_rate_limit_sources",
            "Sources currently held by the rate limiter",
        )?;

        registry.register(Box::new(submissions.clone()))?;
        registry.register(Box::new(tracked_sources.clone()))?;

        Ok(Self {
            registry,
            submissions,
            tracked_sources,
        })
    }

    pub fn record(&self, outcome: Outcome) {
        self.submissions.with_label_values(&[outcome.as_str()]).inc();
    }

    pub fn count(&self, outcome: Outcome) -> u64 {
        self.submissions.with_label_values(&[outcome.as_str()]).get()
    }

    pub fn set_tracked_sources(&self, count: usize) {
        self.tracked_sources.set(count as i64);
    }

    /// Render all metrics in the Prometheus text format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
