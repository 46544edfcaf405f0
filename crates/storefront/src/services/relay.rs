//! Order relay client.
//!
//! Valid checkout submissions are forwarded as a form post to a third-party
//! relay (web3forms-compatible) which mails them to the bakery. The relay
//! answers JSON `{ "success": bool, "message": ... }`.

use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use bakehuset_core::Price;

use crate::config::RelayConfig;

/// Errors that can occur when relaying an order.
#[derive(Debug, Error)]
pub enum RelayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Relay returned a non-success HTTP status.
    #[error("relay error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Relay answered 200 but flagged the submission as failed.
    #[error("relay rejected the submission: {0}")]
    Rejected(String),
}

/// A validated checkout submission, ready to forward.
#[derive(Debug, Clone)]
pub struct OrderSubmission {
    pub name: String,
    pub delivery: bool,
    pub address: String,
    pub phone: String,
    pub message: String,
    pub total: Price,
}

#[derive(Debug, Deserialize)]
struct RelayResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Client for the order relay service.
#[derive(Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    config: RelayConfig,
}

impl RelayClient {
    /// Create a new relay client.
    #[must_use]
    pub fn new(config: RelayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Forward an order submission to the relay.
    ///
    /// Field names match what the bakery's mail template expects.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the relay answers a
    /// non-success status, or the relay flags the submission as failed.
    pub async fn submit_order(&self, order: &OrderSubmission) -> Result<(), RelayError> {
        let sum = order.total.as_kroner().to_string();
        let levering = if order.delivery { "levering" } else { "" };
        let form: &[(&str, &str)] = &[
            ("access_key", self.config.access_key.expose_secret()),
            ("navn", &order.name),
            ("levering", levering),
            ("adresse", &order.address),
            ("telefonnummer", &order.phone),
            ("melding", &order.message),
            ("sum", &sum),
        ];

        let response = self
            .client
            .post(&self.config.endpoint)
            .form(form)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RelayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: RelayResponse = response.json().await?;
        if !body.success {
            return Err(RelayError::Rejected(
                body.message.unwrap_or_else(|| "unknown reason".to_owned()),
            ));
        }

        Ok(())
    }
}
