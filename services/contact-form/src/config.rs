// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the contact form service.
//!
//! Values come from environment variables (see [`Config::from_env`]). The
//! email provider key and the operator inbox are required, but their absence
//! only surfaces when the first notification is dispatched.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Configuration for the contact form service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Email provider configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Per-source submission throttle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Rolling window in milliseconds (default: 300000, five minutes)
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

/// Transactional email provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Provider API key (`RESEND_API_KEY`, required)
    #[serde(default)]
    pub api_key: String,

    /// Operator inbox receiving submissions (`CONTACT_EMAIL`, required)
    #[serde(default)]
    pub contact_email: String,

    /// Sender identity
    #[serde(default = "default_from")]
    pub from: String,

    /// Provider base URL (default: https://api.resend.com)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Provider request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics endpoint path (default: /metrics)
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

/// Configuration problems detected at load or first use.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<&'static str>),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_window_ms() -> u64 {
    5 * 60 * 1000
}

fn default_from() -> String {
    "Website Contact Form <noreply@yourdomain.com>".to_string()
}

fn default_api_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            rate_limit: RateLimitConfig::default(),
            email: EmailConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            contact_email: String::new(),
            from: default_from(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl RateLimitConfig {
    /// Get the rolling window duration
    pub fn window_duration(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

impl EmailConfig {
    /// Check that both required secrets are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut missing = Vec::new();
        if self.api_key.trim().is_empty() {
            missing.push("RESEND_API_KEY");
        }
        if self.contact_email.trim().is_empty() {
            missing.push("CONTACT_EMAIL");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingVariables(missing))
        }
    }

    /// Get the provider request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parse the provider base URL.
    pub fn api_base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.api_url).map_err(|_| ConfigError::InvalidValue {
            name: "RESEND_API_URL",
            value: self.api_url.clone(),
        })
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Unset variables fall back to defaults. A variable that is set but does
    /// not parse is an error rather than a silent fallback.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Ok(Config {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            rate_limit: RateLimitConfig {
                window_ms: parse_var(&lookup, "RATE_LIMIT_WINDOW_MS")?
                    .unwrap_or(defaults.rate_limit.window_ms),
            },
            email: EmailConfig {
                api_key: lookup("RESEND_API_KEY").unwrap_or_default(),
                contact_email: lookup("CONTACT_EMAIL").unwrap_or_default(),
                from: lookup("CONTACT_FROM").unwrap_or(defaults.email.from),
                api_url: lookup("RESEND_API_URL").unwrap_or(defaults.email.api_url),
                timeout_secs: parse_var(&lookup, "EMAIL_TIMEOUT_SECS")?
                    .unwrap_or(defaults.email.timeout_secs),
            },
            metrics: MetricsConfig {
                enabled: parse_var(&lookup, "METRICS_ENABLED")?
                    .unwrap_or(defaults.metrics.enabled),
                path: lookup("METRICS_PATH").unwrap_or(defaults.metrics.path),
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}
