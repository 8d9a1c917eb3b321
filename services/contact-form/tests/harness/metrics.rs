// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Metrics collection for spam simulation results.

use axum::http::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Collects metrics during a spam run.
#[derive(Debug, Default)]
pub struct SpamMetrics {
    start_time: Option<Instant>,
    end_time: Option<Instant>,
    outcomes: HashMap<Outcome, usize>,
    requests_per_ip: HashMap<String, usize>,
    /// Latency samples (microseconds)
    latencies: Vec<u64>,
}

/// Possible outcomes for a submission, as seen by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Accepted,
    Throttled,
    BotRejected,
    Invalid,
    Failed,
    Unexpected,
}

impl Outcome {
    /// Classify a response from the contact endpoint.
    pub fn classify(status: StatusCode, body: &Value) -> Self {
        match (status, body["error"].as_str()) {
            (StatusCode::OK, _) => Outcome::Accepted,
            (StatusCode::TOO_MANY_REQUESTS, _) => Outcome::Throttled,
            (StatusCode::BAD_REQUEST, Some("Invalid submission")) => Outcome::BotRejected,
            (StatusCode::BAD_REQUEST, Some("Validation failed")) => Outcome::Invalid,
            (StatusCode::INTERNAL_SERVER_ERROR, _) => Outcome::Failed,
            _ => Outcome::Unexpected,
        }
    }
}

impl SpamMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        self.end_time = Some(Instant::now());
    }

    pub fn record(&mut self, outcome: Outcome, ip: &str, latency: Duration) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        *self.requests_per_ip.entry(ip.to_string()).or_insert(0) += 1;
        self.latencies.push(latency.as_micros() as u64);
    }

    pub fn total_requests(&self) -> usize {
        self.outcomes.values().sum()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    pub fn duration(&self) -> Duration {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }

    /// Ratio of submissions that did not get through.
    pub fn block_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            return 0.0;
        }
        let accepted = self.count(Outcome::Accepted);
        (total - accepted) as f64 / total as f64
    }

    pub fn median_latency_us(&self) -> u64 {
        if self.latencies.is_empty() {
            return 0;
        }
        let mut sorted = self.latencies.clone();
        sorted.sort_unstable();
        sorted[sorted.len() / 2]
    }

    pub fn unique_ips(&self) -> usize {
        self.requests_per_ip.len()
    }

    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            total_requests: self.total_requests(),
            accepted: self.count(Outcome::Accepted),
            throttled: self.count(Outcome::Throttled),
            bot_rejected: self.count(Outcome::BotRejected),
            invalid: self.count(Outcome::Invalid),
            failed: self.count(Outcome::Failed),
            unexpected: self.count(Outcome::Unexpected),
            duration_ms: self.duration().as_millis() as u64,
            block_rate: self.block_rate(),
            median_latency_us: self.median_latency_us(),
            unique_ips: self.unique_ips(),
        }
    }
}

/// Summary report of a spam run.
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub total_requests: usize,
    pub accepted: usize,
    pub throttled: usize,
    pub bot_rejected: usize,
    pub invalid: usize,
    pub failed: usize,
    pub unexpected: usize,
    pub duration_ms: u64,
    pub block_rate: f64,
    pub median_latency_us: u64,
    pub unique_ips: usize,
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Spam Run Report ===")?;
        writeln!(f, "Duration:          {} ms", self.duration_ms)?;
        writeln!(f, "Total Requests:    {}", self.total_requests)?;
        writeln!(f)?;
        writeln!(f, "--- Outcomes ---")?;
        writeln!(f, "Accepted:          {}", self.accepted)?;
        writeln!(f, "Throttled:         {}", self.throttled)?;
        writeln!(f, "Bot Rejected:      {}", self.bot_rejected)?;
        writeln!(f, "Invalid:           {}", self.invalid)?;
        writeln!(f, "Failed:            {}", self.failed)?;
        writeln!(f, "Unexpected:        {}", self.unexpected)?;
        writeln!(f, "Block Rate:        {:.1}%", self.block_rate * 100.0)?;
        writeln!(f)?;
        writeln!(f, "Median latency:    {} us", self.median_latency_us)?;
        writeln!(f, "Unique IPs:        {}", self.unique_ips)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify() {
        assert_eq!(Outcome::classify(StatusCode::OK, &json!({})), Outcome::Accepted);
        assert_eq!(
            Outcome::classify(StatusCode::BAD_REQUEST, &json!({ "error": "Invalid submission" })),
            Outcome::BotRejected
        );
        assert_eq!(
            Outcome::classify(StatusCode::BAD_REQUEST, &json!({ "error": "Validation failed" })),
            Outcome::Invalid
        );
        assert_eq!(Outcome::classify(StatusCode::NOT_FOUND, &json!({})), Outcome::Unexpected);
    }

    #[test]
    fn test_block_rate() {
        let mut metrics = SpamMetrics::new();
        for _ in 0..3 {
            metrics.record(Outcome::Accepted, "10.0.0.1", Duration::ZERO);
        }
        for _ in 0..7 {
            metrics.record(Outcome::Throttled, "10.0.0.1", Duration::ZERO);
        }

        assert!((metrics.block_rate() - 0.7).abs() < 0.01);
        assert_eq!(metrics.unique_ips(), 1);
    }
}
