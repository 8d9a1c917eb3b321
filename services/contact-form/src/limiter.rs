// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Rolling-window rate limiter for contact submissions.
//!
//! Each source identifier (client IP, or `"unknown"`) may have at most one
//! accepted submission per window. State lives in memory only and expired
//! entries are swept whenever a new submission is recorded.

use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Source identifier used when the client address cannot be determined.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Submission is allowed and has been recorded
    Allowed,
    /// Submission is blocked
    Limited {
        /// Time until the window for this source closes
        retry_after: Duration,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed)
    }
}

/// Per-source submission throttle.
pub struct RateLimiter {
    window: Duration,
    /// Source identifier -> instant of last accepted submission
    entries: RwLock<HashMap<String, Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            window: config.window_duration(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Check and record a submission from `source` at the current instant.
    pub async fn check(&self, source: &str) -> RateLimitResult {
        self.check_at(source, Instant::now()).await
    }

    /// Check and record a submission from `source` at `now`.
    ///
    /// A gap of exactly one window counts as allowed. Blocked attempts do not
    /// move the window.
    pub async fn check_at(&self, source: &str, now: Instant) -> RateLimitResult {
        let mut entries = self.entries.write().await;

        if let Some(last) = entries.get(source) {
            let elapsed = now.saturating_duration_since(*last);
            if elapsed < self.window {
                let retry_after = self.window - elapsed;
                debug!(source, ?retry_after, "Source within rate limit window");
                return RateLimitResult::Limited { retry_after };
            }
        }

        entries.insert(source.to_string(), now);

        let before = entries.len();
        let window = self.window;
        entries.retain(|_, last| now.saturating_duration_since(*last) < window);
        if entries.len() < before {
            debug!(removed = before - entries.len(), "Swept expired rate limit entries");
        }

        RateLimitResult::Allowed
    }

    /// Forget every tracked source.
    pub async fn reset(&self) {
        self.entries.write().await.clear();
    }

    /// Window during which a source may submit only once.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Number of sources currently held in memory.
    pub async fn tracked_sources(&self) -> usize {
        self.entries.read().await.len()
    }
}
