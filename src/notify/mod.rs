//! Teams webhook delivery
//!
//! The webhook endpoint answers 200 or 202 for accepted messages;
//! anything else is treated as a delivery failure.

pub mod card;

use crate::error::NotifyError;
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use serde_json::Value;

/// Seam for message delivery, so the check pipeline can run against a
/// capture in tests
#[async_trait]
pub trait Notifier {
    /// Deliver a payload and return the endpoint's response body
    async fn send(&self, payload: &Value) -> Result<String, NotifyError>;
}

#[derive(Debug, Clone)]
pub struct TeamsWebhook {
    url: String,
    client: reqwest::Client,
}

impl TeamsWebhook {
    pub fn new(url: String) -> Result<Self, NotifyError> {
        validate_url(&url).map_err(|e| NotifyError::InvalidUrl {
            reason: e.to_string(),
        })?;

        Ok(Self {
            url,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Notifier for TeamsWebhook {
    async fn send(&self, payload: &Value) -> Result<String, NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| NotifyError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::new());

        if status == 200 || status == 202 {
            Ok(body)
        } else {
            Err(NotifyError::Rejected { status, body })
        }
    }
}
