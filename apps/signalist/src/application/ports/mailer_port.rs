//! Mailer Port (Driven Port)
//!
//! Interface for delivering rendered HTML emails.

use async_trait::async_trait;

/// A fully rendered email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text alternative.
    pub text: String,
    /// HTML body.
    pub html: String,
}

/// Email delivery error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MailError {
    /// Transport failure.
    #[error("Mail transport error: {message}")]
    Transport {
        /// Error details.
        message: String,
    },

    /// Recipient rejected.
    #[error("Recipient rejected: {recipient}")]
    Rejected {
        /// Rejected address.
        recipient: String,
    },
}

/// Port for sending email.
#[async_trait]
pub trait MailerPort: Send + Sync {
    /// Send one email.
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}
