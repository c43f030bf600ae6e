//! Mailer that records outgoing email in the log instead of sending it.

use async_trait::async_trait;

use crate::application::ports::{MailError, MailerPort, OutgoingEmail};

/// Logs each email at info level.
#[derive(Debug, Clone)]
pub struct LogMailer {
    sender: String,
}

impl LogMailer {
    /// Create a mailer that reports `sender` as the from address.
    #[must_use]
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }

    /// Configured from address.
    #[must_use]
    pub fn sender(&self) -> &str {
        &self.sender
    }
}

#[async_trait]
impl MailerPort for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        if !email.to.contains('@') {
            return Err(MailError::Rejected { recipient: email.to });
        }

        tracing::info!(
            from = %self.sender,
            to = %email.to,
            subject = %email.subject,
            html_bytes = email.html.len(),
            "Email sent"
        );
        tracing::debug!(to = %email.to, text = %email.text, "Email text body");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: to.to_string(),
            subject: "Hourly Stock Alert".to_string(),
            text: "text".to_string(),
            html: "<p>html</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn accepts_addresses() {
        let mailer = LogMailer::new("alerts@signalist.app");
        assert!(mailer.send(email("user@example.com")).await.is_ok());
        assert_eq!(mailer.sender(), "alerts@signalist.app");
    }

    #[tokio::test]
    async fn rejects_malformed_recipient() {
        let mailer = LogMailer::new("alerts@signalist.app");
        let err = mailer.send(email("nobody")).await.unwrap_err();
        assert!(matches!(err, MailError::Rejected { .. }));
    }
}
