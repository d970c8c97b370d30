//! Mailer trait definition.

use errandry_types::email::{DeliveryError, DeliveryReceipt, EmailRequest};

/// Capability port for email dispatch.
///
/// Implementations live in errandry-infra (e.g., `SendGridMailer`). Unlike
/// the other capabilities, a [`DeliveryError`] is never fatal: the router
/// renders it as the turn's visible outcome text.
pub trait Mailer: Send + Sync {
    /// Provider name for logging (e.g., "sendgrid").
    fn name(&self) -> &str;

    /// Hand one message to the provider and return its status receipt.
    fn send(
        &self,
        email: &EmailRequest,
    ) -> impl std::future::Future<Output = Result<DeliveryReceipt, DeliveryError>> + Send;
}
