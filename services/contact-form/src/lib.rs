// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Form Service
//!
//! Backend for a website contact form. Each submission passes through:
//!
//! - Per-source rate limiting (one submission per 5 minutes)
//! - Honeypot bot detection
//! - Field validation
//! - Markup sanitization
//! - Email notification to the operator inbox

pub mod config;
pub mod email;
pub mod handlers;
pub mod honeypot;
pub mod limiter;
pub mod metrics;
pub mod models;
pub mod notifier;
pub mod sanitizer;
pub mod service;
pub mod validator;

pub use config::Config;
pub use limiter::{RateLimitResult, RateLimiter};
pub use notifier::NotificationDispatcher;
pub use service::{ContactService, SubmissionError};
