//! Email dispatch adapters.

pub mod sendgrid;

pub use sendgrid::SendGridMailer;
