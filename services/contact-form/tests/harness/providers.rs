// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Fake email providers that record what they were asked to send.

use contact_form::email::{EmailMessage, EmailProvider, ProviderError};
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};

/// How the fake answers each send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    /// Accept and return a delivery id
    Deliver,
    /// Answer without a delivery id
    NoId,
    /// Fail with an upstream error
    Fail,
}

#[derive(Debug, Clone)]
pub struct FakeProvider {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    behaviour: Behaviour,
}

impl FakeProvider {
    pub fn new(behaviour: Behaviour) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            behaviour,
        }
    }

    pub fn delivering() -> Self {
        Self::new(Behaviour::Deliver)
    }

    pub fn failing() -> Self {
        Self::new(Behaviour::Fail)
    }

    /// Every message handed to the provider, in order.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl EmailProvider for FakeProvider {
    async fn send(&self, message: EmailMessage) -> Result<Option<String>, ProviderError> {
        let n = {
            let mut sent = self.sent.lock().unwrap();
            sent.push(message);
            sent.len()
        };

        match self.behaviour {
            Behaviour::Deliver => Ok(Some(format!("email-{n}"))),
            Behaviour::NoId => Ok(None),
            Behaviour::Fail => Err(ProviderError::Status {
                status: StatusCode::BAD_GATEWAY,
                body: "internal provider detail: key re_test_key rejected".to_string(),
            }),
        }
    }
}
