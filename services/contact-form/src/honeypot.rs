// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Honeypot bot filter.
//!
//! The form renders a `website` input that humans never see. Naive bots fill
//! in every field, so any value there marks the submission as automated.

use serde_json::Value;
use tracing::debug;

/// Name of the hidden form field.
pub const HONEYPOT_FIELD: &str = "website";

/// Returns `true` when the hidden field carries a value.
///
/// Anything other than an absent field, `null`, `false`, `0` or an empty
/// string counts as filled.
pub fn is_tripped(payload: &Value) -> bool {
    let tripped = match payload.get(HONEYPOT_FIELD) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    };

    if tripped {
        debug!(field = HONEYPOT_FIELD, "Honeypot field populated");
    }
    tripped
}
