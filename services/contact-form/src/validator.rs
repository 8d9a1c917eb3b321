// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Contact submission validator.
//!
//! Works on the raw JSON payload so that missing fields and wrong types are
//! reported per field instead of failing deserialization as a whole:
//! - `name`: required, 2-100 characters
//! - `email`: required, valid address syntax
//! - `phone`: optional, any format
//! - `message`: required, 10-1000 characters

use crate::models::{ContactSubmission, FieldErrors};
use email_address::{EmailAddress, Options};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 1000;

/// A single problem with a single field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{label} is required")]
    Required { label: &'static str },

    #[error("{label} must be a string")]
    NotAString { label: &'static str },

    #[error("{label} must be at least {min} characters")]
    TooShort { label: &'static str, min: usize },

    #[error("{label} must be at most {max} characters")]
    TooLong { label: &'static str, max: usize },

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Validate a raw submission payload.
pub fn validate(payload: &Value) -> Result<ContactSubmission, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = check_field(
        &mut errors,
        "name",
        required_string(payload, "name", "Name")
            .and_then(|s| check_length(s, "Name", NAME_MIN_CHARS, NAME_MAX_CHARS)),
    );

    let email = check_field(
        &mut errors,
        "email",
        required_string(payload, "email", "Email").and_then(|s| {
            if is_valid_email(s) {
                Ok(s)
            } else {
                Err(FieldError::InvalidEmail)
            }
        }),
    );

    let phone = check_field(&mut errors, "phone", optional_string(payload, "phone", "Phone"));

    let message = check_field(
        &mut errors,
        "message",
        required_string(payload, "message", "Message")
            .and_then(|s| check_length(s, "Message", MESSAGE_MIN_CHARS, MESSAGE_MAX_CHARS)),
    );

    match (name, email, phone, message) {
        (Some(name), Some(email), Some(phone), Some(message)) if errors.is_empty() => {
            debug!("Submission passed validation");
            Ok(ContactSubmission {
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.map(str::to_string),
                message: message.to_string(),
            })
        }
        _ => {
            debug!(fields = ?errors.fields().collect::<Vec<_>>(), "Submission failed validation");
            Err(errors)
        }
    }
}

/// Bare `local@domain.tld` only. Display text (`Name <addr>`) would be eaten
/// by the sanitizer, leaving the operator without a reply address.
fn is_valid_email(value: &str) -> bool {
    let options = Options::default().without_display_text();
    match EmailAddress::parse_with_options(value, options) {
        Ok(address) => {
            let domain = address.domain();
            let labels = domain.split('.').filter(|label| !label.is_empty()).count();
            !domain.starts_with('[') && labels >= 2
        }
        Err(_) => false,
    }
}

fn check_field<T>(errors: &mut FieldErrors, field: &str, result: Result<T, FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.add(field, err.to_string());
            None
        }
    }
}

fn required_string<'a>(
    payload: &'a Value,
    field: &str,
    label: &'static str,
) -> Result<&'a str, FieldError> {
    match payload.get(field) {
        None | Some(Value::Null) => Err(FieldError::Required { label }),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(FieldError::NotAString { label }),
    }
}

/// Absent, `null` and empty-string values all mean "not provided".
fn optional_string<'a>(
    payload: &'a Value,
    field: &str,
    label: &'static str,
) -> Result<Option<&'a str>, FieldError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(FieldError::NotAString { label }),
    }
}

fn check_length<'a>(
    value: &'a str,
    label: &'static str,
    min: usize,
    max: usize,
) -> Result<&'a str, FieldError> {
    let chars = value.chars().count();
    if chars < min {
        Err(FieldError::TooShort { label, min })
    } else if chars > max {
        Err(FieldError::TooLong { label, max })
    } else {
        Ok(value)
    }
}
