// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Spam traffic patterns for security testing.

/// Spam run configuration.
#[derive(Debug, Clone)]
pub struct SpamConfig {
    /// Total number of submissions to send
    pub total_requests: usize,
    /// Number of unique forwarded-for addresses
    pub unique_ips: usize,
    /// Fraction of submissions with the honeypot filled (0.0-1.0)
    pub honeypot_ratio: f64,
    /// Fraction of submissions that fail validation (0.0-1.0)
    pub invalid_ratio: f64,
    /// Omit the forwarded-for header entirely
    pub hide_address: bool,
}

impl Default for SpamConfig {
    fn default() -> Self {
        Self {
            total_requests: 50,
            unique_ips: 1,
            honeypot_ratio: 0.0,
            invalid_ratio: 0.0,
            hide_address: false,
        }
    }
}

/// Predefined spam patterns.
impl SpamConfig {
    /// One address hammering the form.
    pub fn single_ip_flood() -> Self {
        Self {
            total_requests: 200,
            unique_ips: 1,
            ..Default::default()
        }
    }

    /// Many addresses, each submitting a few times.
    pub fn distributed_spam() -> Self {
        Self {
            total_requests: 300,
            unique_ips: 100,
            ..Default::default()
        }
    }

    /// Form-filling bots, one submission per address.
    pub fn honeypot_bots() -> Self {
        Self {
            total_requests: 60,
            unique_ips: 60,
            honeypot_ratio: 1.0,
            ..Default::default()
        }
    }

    /// Garbage payloads from fresh addresses.
    pub fn garbage_payloads() -> Self {
        Self {
            total_requests: 40,
            unique_ips: 40,
            invalid_ratio: 1.0,
            ..Default::default()
        }
    }

    /// Clients behind a proxy that drops the forwarded-for header.
    pub fn anonymous_flood() -> Self {
        Self {
            total_requests: 30,
            unique_ips: 30,
            hide_address: true,
            ..Default::default()
        }
    }

    /// Number of distinct addresses that get one shot at the form.
    pub fn distinct_sources(&self) -> usize {
        if self.hide_address {
            1
        } else {
            self.unique_ips.min(self.total_requests)
        }
    }
}

/// Simple deterministic "random" based on index and ratio.
pub fn rand_bool(ratio: f64, index: usize) -> bool {
    if ratio >= 1.0 {
        true
    } else if ratio <= 0.0 {
        false
    } else {
        (index as f64 * 0.618033988749895) % 1.0 < ratio
    }
}
