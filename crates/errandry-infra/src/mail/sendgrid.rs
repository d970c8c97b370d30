//! SendGridMailer -- concrete [`Mailer`] implementation for SendGrid.
//!
//! Sends requests to the SendGrid mail API (`/v3/mail/send`) with bearer
//! authentication. Credentials are optional: a mailer built without an API
//! key or sender address returns [`DeliveryError::NotConfigured`] on every
//! send, which the router renders as the turn's outcome text. This lets
//! deployments without email run the other two branches untouched.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use errandry_core::port::Mailer;
use errandry_types::email::{DeliveryError, DeliveryReceipt, EmailRequest};

/// Request body for the SendGrid mail send API.
#[derive(Debug, Clone, Serialize)]
struct SendGridRequest {
    personalizations: Vec<Personalization>,
    from: Address,
    subject: String,
    content: Vec<Content>,
}

#[derive(Debug, Clone, Serialize)]
struct Personalization {
    to: Vec<Address>,
}

#[derive(Debug, Clone, Serialize)]
struct Address {
    email: String,
}

#[derive(Debug, Clone, Serialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: String,
    value: String,
}

/// SendGrid mail client.
pub struct SendGridMailer {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    from_email: Option<String>,
    base_url: String,
}

impl SendGridMailer {
    pub fn new(api_key: Option<SecretString>, from_email: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            from_email,
            base_url: "https://api.sendgrid.com".to_string(),
        }
    }

    /// Override the API origin (tests, proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn to_sendgrid_request(&self, email: &EmailRequest, from: &str) -> SendGridRequest {
        SendGridRequest {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: email.to.clone(),
                }],
            }],
            from: Address {
                email: from.to_string(),
            },
            subject: email.subject.clone(),
            content: vec![Content {
                content_type: "text/plain".to_string(),
                value: email.body.clone(),
            }],
        }
    }
}

// No Debug derive; the SecretString must stay out of formatted output.

impl Mailer for SendGridMailer {
    fn name(&self) -> &str {
        "sendgrid"
    }

    async fn send(&self, email: &EmailRequest) -> Result<DeliveryReceipt, DeliveryError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            DeliveryError::NotConfigured("SENDGRID_API_KEY is not set".to_string())
        })?;
        let from = self.from_email.as_deref().ok_or_else(|| {
            DeliveryError::NotConfigured("sender address is not configured".to_string())
        })?;

        let body = self.to_sendgrid_request(email, from);
        let url = self.url("/v3/mail/send");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status_code: status.as_u16(),
                detail,
            });
        }

        Ok(DeliveryReceipt {
            status_code: status.as_u16(),
        })
    }
}
