use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a registration contact is interpreted. Exactly one of
/// email/phone is set per account and is the login lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    Phone,
}

impl ContactKind {
    /// Anything with an `@` is treated as an email, everything else as
    /// a phone number.
    pub fn classify(contact: &str) -> Self {
        if contact.contains('@') {
            ContactKind::Email
        } else {
            ContactKind::Phone
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
