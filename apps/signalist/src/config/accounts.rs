//! Mail sender and seeded accounts.

use serde::{Deserialize, Serialize};

use crate::domain::{UserAccount, UserId};

/// Outgoing mail settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// `From` header for all emails.
    #[serde(default = "default_sender")]
    pub sender: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            sender: default_sender(),
        }
    }
}

fn default_sender() -> String {
    "Signalist <signalist@localhost>".to_string()
}

/// A session issued ahead of time, with the account it belongs to.
#[derive(Clone, Serialize, Deserialize)]
pub struct StaticSession {
    /// Opaque session token.
    pub token: String,
    /// Owner.
    pub user_id: String,
    /// Owner's email address.
    pub email: String,
    /// Owner's display name.
    #[serde(default)]
    pub name: String,
}

impl std::fmt::Debug for StaticSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSession")
            .field("token", &"***")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("name", &self.name)
            .finish()
    }
}

impl StaticSession {
    /// Account behind this session.
    #[must_use]
    pub fn account(&self) -> UserAccount {
        UserAccount {
            id: UserId::new(self.user_id.trim()),
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
        }
    }
}

/// Authentication settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Sessions loaded at startup.
    #[serde(default)]
    pub sessions: Vec<StaticSession>,
}
